// tests/symbios_bridge.rs
use lsystem_turtle::LSystem;
use symbios::SymbolTable;

#[test]
fn test_sentence_exports_one_module_per_symbol() {
    let mut system = LSystem::new("F", [('F', "F+F")]);
    system.generate(1);

    let mut table = SymbolTable::new();
    let state = system.to_symbios(&mut table).unwrap();

    let f_id = table.resolve_id("F").unwrap();
    let plus_id = table.resolve_id("+").unwrap();
    assert_ne!(f_id, plus_id);

    assert_eq!(state.len(), 3);
    let syms: Vec<_> = (0..state.len())
        .map(|i| state.get_view(i).unwrap().sym)
        .collect();
    assert_eq!(syms, vec![f_id, plus_id, f_id]);
}

#[test]
fn test_existing_symbol_ids_are_reused() {
    let mut table = SymbolTable::new();
    table.intern("+").unwrap();
    let plus_id = table.resolve_id("+").unwrap();

    let system = LSystem::new("+F", [('F', "FF")]);
    let state = system.to_symbios(&mut table).unwrap();

    assert_eq!(table.resolve_id("+"), Some(plus_id));
    assert_eq!(state.get_view(0).unwrap().sym, plus_id);
}

#[test]
fn test_intern_failure_names_symbol() {
    let err = lsystem_turtle::LsysError::Intern {
        symbol: 'F',
        reason: "ID overflow".to_string(),
    };
    assert_eq!(err.to_string(), "cannot intern symbol 'F': ID overflow");
}
