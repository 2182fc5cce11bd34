//! Trace hooks for decode, encode and path resolution.
//!
//! Operations take an observer by reference instead of consulting a
//! process-wide switch. [`NoopObserver`] is the default;
//! [`TracingObserver`] forwards every hook to `tracing` at trace level.

use crate::raw::Kind;

pub trait Observer {
    fn node_decoded(&self, _kind: Kind, _line: usize, _depth: usize) {}

    fn key_decoded(&self, _name: &str, _depth: usize) {}

    fn node_encoded(&self, _type_name: &'static str, _depth: usize) {}

    fn path_step(&self, _segment: &str, _depth: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

pub(crate) static NOOP: NoopObserver = NoopObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn node_decoded(&self, kind: Kind, line: usize, depth: usize) {
        tracing::trace!(%kind, line, depth, "decoded node");
    }

    fn key_decoded(&self, name: &str, depth: usize) {
        tracing::trace!(key = name, depth, "decoded mapping key");
    }

    fn node_encoded(&self, type_name: &'static str, depth: usize) {
        tracing::trace!(value = type_name, depth, "encoded node");
    }

    fn path_step(&self, segment: &str, depth: usize) {
        tracing::trace!(segment, depth, "path step");
    }
}
