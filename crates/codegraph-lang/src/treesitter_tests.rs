use super::*;
use codegraph_core::types::NodeKind;

#[test]
fn python_three_top_level_classes_scenario() {
    // Spec §8 scenario 1.
    let source = "class D1:\n    pass\n\n\nclass D2:\n    pass\n\n\nclass D:\n    pass\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Python, Path::new("d.py"), source).unwrap();

    let classes: Vec<_> = result.definitions.iter().filter(|d| d.kind == NodeKind::Class).collect();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes[0].name, "d.py#D1");
    assert_eq!((classes[0].start_line, classes[0].end_line), (1, 2));
    assert_eq!(classes[1].name, "d.py#D2");
    assert_eq!((classes[1].start_line, classes[1].end_line), (5, 6));
    assert_eq!(classes[2].name, "d.py#D");
    assert_eq!((classes[2].start_line, classes[2].end_line), (9, 10));
}

#[test]
fn python_method_is_attributed_to_its_class() {
    let source = "class Thing:\n    def run(self):\n        return 1\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Python, Path::new("t.py"), source).unwrap();

    let method = result.definitions.iter().find(|d| d.name.ends_with("Thing.run")).expect("method found");
    assert_eq!(method.parent.as_deref(), Some("Thing"));
    assert!(method.short_names.contains(&"run".to_string()));
    assert!(method.short_names.contains(&"Thing.run".to_string()));
}

#[test]
fn python_self_call_reference_is_captured() {
    let source = "class Thing:\n    def helper(self):\n        return 1\n\n    def run(self):\n        return self.helper()\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Python, Path::new("t.py"), source).unwrap();

    let found = result
        .references
        .iter()
        .any(|r| r.role == ReferenceRole::Call && r.name_path == vec!["self".to_string(), "helper".to_string()]);
    assert!(found, "expected a self.helper() call reference, got {:?}", result.references);
}

#[test]
fn go_method_receiver_is_captured() {
    let source = "package main\n\ntype User struct {\n\tName string\n}\n\nfunc (u *User) SetName(n string) {\n\tu.Name = n\n}\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Go, Path::new("main.go"), source).unwrap();

    let method = result.definitions.iter().find(|d| d.name.ends_with("SetName")).expect("method found");
    assert_eq!(method.receiver_type.as_deref(), Some("User"));
}

#[test]
fn go_struct_embedding_is_an_inherit_reference() {
    let source = "package main\n\ntype Inner struct {\n\tX int\n}\n\ntype Outer struct {\n\tInner\n\tY int\n}\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Go, Path::new("main.go"), source).unwrap();

    let found = result.references.iter().any(|r| r.role == ReferenceRole::Inherit && r.name_path == vec!["Inner".to_string()]);
    assert!(found, "expected an Inherit reference to Inner, got {:?}", result.references);
}

#[test]
fn go_import_reference_carries_alias() {
    let source = "package main\n\nimport \"time\"\n\nfunc now() {\n\ttime.Now()\n}\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Go, Path::new("main.go"), source).unwrap();

    let import = result.references.iter().find(|r| r.role == ReferenceRole::Import).expect("import found");
    assert_eq!(import.import_path.as_deref(), Some("time"));
    assert_eq!(import.alias.as_deref(), Some("time"));
}

#[test]
fn typescript_class_and_interface_definitions() {
    let source = "export interface User {\n  name: string;\n}\n\nexport class UserService {\n  create(u: User) {\n    return u;\n  }\n}\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::TypeScript, Path::new("types.ts"), source).unwrap();

    assert!(result.definitions.iter().any(|d| d.kind == NodeKind::Interface && d.name.ends_with("User")));
    assert!(result.definitions.iter().any(|d| d.kind == NodeKind::Class && d.name.ends_with("UserService")));
}

#[test]
fn typescript_named_import_is_captured() {
    let source = "import { User, UserService } from './types';\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::TypeScript, Path::new("main.ts"), source).unwrap();

    let imports: Vec<_> = result.references.iter().filter(|r| r.role == ReferenceRole::Import).collect();
    assert_eq!(imports.len(), 2);
    assert!(imports.iter().all(|i| i.import_path.as_deref() == Some("./types")));
}

#[test]
fn skeleton_code_elides_method_bodies_but_keeps_signatures() {
    let source = "class Thing:\n    def run(self):\n        x = 1\n        return x\n";
    let mut parser = TreeSitterParser::new();
    let result = parser.parse_file(LanguageTag::Python, Path::new("t.py"), source).unwrap();

    let class_def = result.definitions.iter().find(|d| d.kind == NodeKind::Class).unwrap();
    assert!(class_def.skeleton_code.contains("def run(self)"));
    assert!(!class_def.skeleton_code.contains("return x"));
}
