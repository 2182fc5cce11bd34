use std::cell::RefCell;
use yamlwalk::{Mapping, Node, Observer, PathWalker, Style, Value, WalkError};

fn sample() -> Result<Node, WalkError> {
    let mut root = Node::mapping();
    root.append("a", Node::mapping())?;
    root.append("a.b", Node::from(1))?;
    root.append("a.c", Node::from(2))?;
    root.append("items", Node::from(vec![Node::from(10), Node::from(20), Node::from(30)]))?;
    Ok(root)
}

fn ints(node: &Node, path: &str) -> Result<Vec<i64>, WalkError> {
    let items = node.as_slice(path)?;
    let mut out = Vec::new();
    for i in 0..items.len() {
        out.push(node.item(path, i)?.as_int("")?);
    }
    Ok(out)
}

#[test]
fn empty_path_returns_the_node_itself() -> Result<(), Box<dyn std::error::Error>> {
    let root = sample()?;
    let same = root.get("")?;
    assert!(std::ptr::eq(same, &root));

    let scalar = Node::from("leaf");
    assert!(std::ptr::eq(scalar.get("")?, &scalar));
    Ok(())
}

#[test]
fn get_nested_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;
    assert_eq!(root.get("a.c")?.value(), &Value::from(2));

    let removed = root.delete("a.c")?;
    assert_eq!(removed.value(), &Value::from(2));

    let err = root.get("a.c").unwrap_err();
    assert!(matches!(err, WalkError::NotFound(ref p) if p == "a.c"));

    let a = root.as_map("a")?;
    assert_eq!(a.len(), 1);
    assert_eq!(a.keys().len(), 1);
    assert_eq!(a.keys()[0].name, "b");
    Ok(())
}

#[test]
fn get_errors_and_get_value_sentinel() -> Result<(), Box<dyn std::error::Error>> {
    let root = sample()?;

    assert!(matches!(root.get("missing"), Err(WalkError::NotFound(_))));
    assert!(matches!(
        root.get("a.b.c"),
        Err(WalkError::InvalidType { expected: "mapping", found: "int" })
    ));
    assert!(matches!(
        root.get("items.0"),
        Err(WalkError::InvalidType { found: "sequence", .. })
    ));

    let seq = Node::from(vec![Node::from(1)]);
    assert!(matches!(seq.get("object"), Err(WalkError::InvalidType { .. })));

    assert!(root.get_value("missing").is_none());
    assert!(root.get_value("a.b.c").is_none());
    assert!(seq.get_value("object").is_none());
    assert_eq!(root.get_value("a.b"), Some(&Value::from(1)));
    Ok(())
}

#[test]
fn set_and_set_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;

    root.set("a.c", Node::from(3).with_style(Style::DoubleQuoted))?;
    let c = root.get("a.c")?;
    assert_eq!(c.value(), &Value::from(3));
    assert_eq!(c.style(), Style::Plain);

    root.set_value("a.b", 5);
    assert_eq!(root.as_int("a.b")?, 5);

    let before = root.clone();
    root.set_value("invalid", 5);
    assert_eq!(root, before);
    assert!(!root.as_map("")?.contains_key("invalid"));
    Ok(())
}

#[test]
fn set_reports_unresolved_path() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = Node::mapping();
    root.append("first", Node::from(1))?;
    root.append("second", Node::from(2))?;

    let err = root.set("third", Node::from(3)).unwrap_err();
    assert!(matches!(err, WalkError::NotFound(_)));

    let err = root.set("second.child", Node::from(3)).unwrap_err();
    assert!(matches!(err, WalkError::InvalidType { .. }));
    Ok(())
}

#[test]
fn set_inside_sequence_items() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = Node::mapping();
    let mut items = Vec::new();
    for (level, value) in [(1, "abc"), (2, "def")] {
        let mut item = Node::mapping();
        item.append("level", Node::from(level))?;
        item.append("value", Node::from(value))?;
        items.push(item);
    }
    root.append("first", Node::from(items))?;

    for (i, (level, value)) in [(10, "ABC"), (20, "DEF")].into_iter().enumerate() {
        let item = root.item_mut("first", i)?;
        item.set("level", Node::from(level))?;
        item.set("value", Node::from(value))?;
    }

    assert_eq!(root.item("first", 0)?.as_int("level")?, 10);
    assert_eq!(root.item("first", 1)?.as_str("value")?, "DEF");
    assert!(matches!(
        root.item("first", 2),
        Err(WalkError::InvalidRange { index: 2, len: 2 })
    ));
    Ok(())
}

#[test]
fn append_then_get_and_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;

    root.append("a.d", Node::from("new"))?;
    assert_eq!(root.get("a.d")?.value(), &Value::from("new"));

    let before = root.clone();
    let err = root.append("a.d", Node::from("again")).unwrap_err();
    assert!(matches!(err, WalkError::DuplicateKey(ref p) if p == "a.d"));
    assert_eq!(root, before);

    let names: Vec<&str> = root.as_map("a")?.keys().iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["b", "c", "d"]);
    Ok(())
}

#[test]
fn append_with_empty_path_is_key_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let mut trees = vec![Node::new(), Node::mapping(), Node::from(1), sample()?];
    for tree in &mut trees {
        let err = tree.append("", Node::from(1)).unwrap_err();
        assert!(matches!(err, WalkError::KeyMismatch));
    }
    Ok(())
}

#[test]
fn append_into_null_creates_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = Node::mapping();
    root.append("holder", Node::new())?;
    root.append_with_style("holder.appended", Node::from(1), Style::SingleQuoted)?;

    let holder = root.as_map("holder")?;
    assert_eq!(holder.keys().len(), 1);
    assert_eq!(holder.keys()[0].name, "appended");
    assert_eq!(holder.keys()[0].style, Style::SingleQuoted);
    assert_eq!(root.as_int("holder.appended")?, 1);
    Ok(())
}

#[test]
fn append_errors_leave_tree_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;
    let before = root.clone();

    assert!(matches!(
        root.append("something.missing", Node::from(1)),
        Err(WalkError::NotFound(_))
    ));
    assert!(matches!(
        root.append("a.b.something", Node::from(1)),
        Err(WalkError::InvalidType { .. })
    ));
    assert!(matches!(
        root.append("items.x", Node::from(1)),
        Err(WalkError::InvalidType { found: "sequence", .. })
    ));
    assert_eq!(root, before);
    Ok(())
}

#[test]
fn delete_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;
    let before = root.clone();

    assert!(matches!(root.delete(""), Err(WalkError::KeyMismatch)));
    assert!(matches!(root.delete("third.something"), Err(WalkError::NotFound(_))));
    assert!(matches!(root.delete("a.something"), Err(WalkError::NotFound(_))));
    assert!(matches!(
        root.delete("a.b.something"),
        Err(WalkError::InvalidType { .. })
    ));
    assert_eq!(root, before);
    Ok(())
}

#[test]
fn remove_then_insert_in_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;

    let removed = root.remove("items", 1)?;
    assert_eq!(removed.value(), &Value::from(20));
    assert_eq!(ints(&root, "items")?, [10, 30]);

    root.insert("items", 1, Node::from(99))?;
    assert_eq!(ints(&root, "items")?, [10, 99, 30]);
    Ok(())
}

#[test]
fn insert_then_remove_restores_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;
    let before = root.clone();

    for i in 0..=3 {
        root.insert("items", i, Node::from(-1))?;
        let taken = root.remove("items", i)?;
        assert_eq!(taken.value(), &Value::from(-1));
        assert_eq!(root, before);
    }
    Ok(())
}

#[test]
fn insert_range_checks() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;

    root.insert("items", 3, Node::from(40))?;
    assert_eq!(ints(&root, "items")?, [10, 20, 30, 40]);

    let before = root.clone();
    assert!(matches!(
        root.insert("items", 6, Node::from(0)),
        Err(WalkError::InvalidRange { index: 6, len: 4 })
    ));
    assert!(matches!(
        root.remove("items", 4),
        Err(WalkError::InvalidRange { index: 4, len: 4 })
    ));
    assert_eq!(root, before);
    Ok(())
}

#[test]
fn insert_and_remove_require_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut root = sample()?;
    assert!(matches!(
        root.insert("a", 0, Node::from(1)),
        Err(WalkError::InvalidType { expected: "sequence", found: "mapping" })
    ));
    assert!(matches!(
        root.remove("a.b", 0),
        Err(WalkError::InvalidType { expected: "sequence", found: "int" })
    ));
    assert!(matches!(root.remove("nope", 0), Err(WalkError::NotFound(_))));
    Ok(())
}

#[test]
fn insert_into_empty_root_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut seq = Node::sequence();
    for i in 0..10 {
        seq.insert("", i, Node::from(i as i64))?;
    }
    assert_eq!(ints(&seq, "")?, (0..10).collect::<Vec<i64>>());
    Ok(())
}

#[test]
fn mapping_insert_and_remove_keep_index_in_step() {
    let mut m: Mapping = [("x", Node::from(1)), ("y", Node::from(2))].into_iter().collect();
    assert!(m.is_consistent());

    let previous = m.insert("x", Node::from(3), Style::DoubleQuoted);
    assert_eq!(previous.map(Node::into_value), Some(Value::from(1)));
    assert_eq!(m.keys()[0].style, Style::Plain);
    assert_eq!(m.len(), 2);

    assert!(m.remove("zz").is_none());
    assert!(m.remove("x").is_some());
    assert!(m.is_consistent());
    assert_eq!(m.keys().len(), 1);
}

#[derive(Default)]
struct StepRecorder {
    steps: RefCell<Vec<String>>,
}

impl Observer for StepRecorder {
    fn path_step(&self, segment: &str, _depth: usize) {
        self.steps.borrow_mut().push(segment.to_string());
    }
}

#[test]
fn observer_sees_each_path_step() -> Result<(), Box<dyn std::error::Error>> {
    let root = sample()?;
    let recorder = StepRecorder::default();
    let walker = PathWalker::with_observer(&recorder);

    walker.get(&root, "a.b")?;
    assert!(walker.get(&root, "a.zz").is_err());

    assert_eq!(*recorder.steps.borrow(), ["a", "b", "a", "zz"]);
    Ok(())
}
