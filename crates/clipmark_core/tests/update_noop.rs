use clipmark_core::{update, ContextState, Msg};

#[test]
fn update_is_noop() {
    let state = ContextState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
