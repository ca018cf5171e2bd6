use boardsourced::BoardEngine;

#[test]
fn s1_straight_line_undo_redo() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    engine.edit_board_title(board_id, "T1".into()).unwrap();
    engine.edit_board_title(board_id, "T2".into()).unwrap();
    engine.edit_board_title(board_id, "T3".into()).unwrap();

    let tip = engine.render_board(board_id).unwrap();
    let v = tip.version_cursor;

    engine.undo(board_id).unwrap();
    let rendered = engine.render_board(board_id).unwrap();
    assert_eq!(rendered.version_cursor, v - 1);
    assert_eq!(rendered.title, "T2");

    engine.redo(board_id).unwrap();
    let rendered = engine.render_board(board_id).unwrap();
    assert_eq!(rendered.version_cursor, v);
    assert_eq!(rendered.title, "T3");
}

#[test]
fn s2_undo_past_several_edits_then_redo() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    for i in 1..=5 {
        engine.edit_board_title(board_id, format!("Title{i}")).unwrap();
    }

    for _ in 0..3 {
        engine.undo(board_id).unwrap();
    }
    let rendered = engine.render_board(board_id).unwrap();
    assert_eq!(rendered.version_cursor, 4);
    assert_eq!(rendered.title, "Title2");

    while engine.render_board(board_id).unwrap().version_cursor < 7 {
        engine.redo(board_id).unwrap();
    }
    let rendered = engine.render_board(board_id).unwrap();
    assert_eq!(rendered.title, "Title5");
}

#[test]
fn s3_redo_chain_breaks_after_editing_past_branch() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    engine.add_column(board_id).unwrap();
    engine.add_column(board_id).unwrap();
    engine.add_column(board_id).unwrap();

    engine.undo(board_id).unwrap();
    engine.undo(board_id).unwrap();
    let after_undo = engine.render_board(board_id).unwrap();
    assert_eq!(after_undo.version_cursor, 3);
    assert_eq!(after_undo.columns.len(), 1);

    let new_column = engine.add_column(board_id).unwrap();
    engine
        .edit_column_title(board_id, new_column, "D-edited".into())
        .unwrap();

    let before_redo = engine.render_board(board_id).unwrap();
    let cursor_before = before_redo.version_cursor;

    engine.redo(board_id).unwrap();
    let after_redo = engine.render_board(board_id).unwrap();
    assert_eq!(after_redo.version_cursor, cursor_before, "no forward branch to redo into");
    assert_eq!(after_redo.columns.last().unwrap().title, "D-edited");
}

#[test]
fn s4_commit_glues_branch_and_redo_hops_over_it() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    for i in 1..=20 {
        engine.edit_board_title(board_id, format!("Edit{i}")).unwrap();
    }

    for _ in 0..10 {
        engine.undo(board_id).unwrap();
    }
    assert_eq!(engine.render_board(board_id).unwrap().version_cursor, 12);

    for _ in 0..5 {
        engine.redo(board_id).unwrap();
    }
    assert_eq!(engine.render_board(board_id).unwrap().version_cursor, 17);

    engine.edit_board_title(board_id, "Final".into()).unwrap();
    let after_edit = engine.render_board(board_id).unwrap();
    assert_eq!(after_edit.version_cursor, 24);
    assert_eq!(after_edit.title, "Final");

    engine.undo(board_id).unwrap();
    let hopped_back = engine.render_board(board_id).unwrap();
    assert_eq!(hopped_back.version_cursor, 17);
    assert_eq!(hopped_back.title, "Edit15");

    engine.undo(board_id).unwrap();
    assert_eq!(engine.render_board(board_id).unwrap().version_cursor, 16);

    engine.redo(board_id).unwrap();
    assert_eq!(engine.render_board(board_id).unwrap().version_cursor, 17);

    engine.redo(board_id).unwrap();
    let back_at_tip = engine.render_board(board_id).unwrap();
    assert_eq!(back_at_tip.version_cursor, 24);
    assert_eq!(back_at_tip.title, "Final");
}

#[test]
fn s5_undo_clamps_at_floor() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    engine.edit_board_title(board_id, "First".into()).unwrap();
    engine.edit_board_title(board_id, "Second".into()).unwrap();

    for _ in 0..10 {
        engine.undo(board_id).unwrap();
    }
    let rendered = engine.render_board(board_id).unwrap();
    assert_eq!(rendered.version_cursor, 2);
    assert_eq!(rendered.title, "");
}

#[test]
fn s6_cross_column_move_preserves_card_identity() {
    let engine = BoardEngine::new();
    let board_id = engine.create_board().unwrap();
    let column_a = engine.add_column(board_id).unwrap();
    let column_b = engine.add_column(board_id).unwrap();
    let card = engine
        .add_card(board_id, column_a, "a1".into(), "content".into())
        .unwrap();

    engine
        .move_card(board_id, column_a, column_b, card, 0)
        .unwrap();

    let rendered = engine.render_board(board_id).unwrap();
    let a = rendered.columns.iter().find(|c| c.id == column_a).unwrap();
    let b = rendered.columns.iter().find(|c| c.id == column_b).unwrap();
    assert!(a.cards.is_empty());
    assert_eq!(b.cards.len(), 1);
    assert_eq!(b.cards[0].id, card);
    assert_eq!(b.cards[0].title, "a1");
    assert_eq!(b.cards[0].content, "content");
}
