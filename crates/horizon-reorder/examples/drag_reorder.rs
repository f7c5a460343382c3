//! Drag Reorder Example
//!
//! Simulates a host feeding pointer gestures into a reorderable list:
//! - A completed drag that moves a row and notifies observers
//! - A cancelled drag that leaves the list untouched
//! - A drop that fails because the list was edited mid-drag
//!
//! Run with: cargo run -p horizon-reorder --example drag_reorder

use horizon_reorder::{DragGesture, Keyed, ReorderableList};

fn print_list(list: &ReorderableList<Keyed<&'static str>>) {
    for (row, item) in list.items().iter().enumerate() {
        println!("  {row}: {}", item.value());
    }
    println!();
}

fn main() -> Result<(), horizon_reorder::ReorderError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let list = ReorderableList::new(Keyed::wrap([
        "Write report",
        "Review patches",
        "Plan sprint",
        "Clear inbox",
    ]));

    let _moved = list.signals().rows_moved.connect_scoped(|&(from, to)| {
        println!("observer: row {from} moved to row {to}");
    });
    let _inserted = list.signals().rows_inserted.connect_scoped(|&(first, _)| {
        println!("observer: row inserted at {first}");
    });

    println!("Initial order:");
    print_list(&list);

    // Grab the first row, drag it down two positions, release.
    println!("Dragging row 0 down to row 2...");
    list.handle_gesture(DragGesture::Start { index: 0 })?;
    list.handle_gesture(DragGesture::Over { index: 1 })?;
    list.handle_gesture(DragGesture::Over { index: 2 })?;
    list.handle_gesture(DragGesture::Drop { index: 2 })?;
    print_list(&list);

    // Start another drag, then abort it with escape.
    println!("Dragging row 3, then cancelling...");
    list.handle_gesture(DragGesture::Start { index: 3 })?;
    list.handle_gesture(DragGesture::Over { index: 0 })?;
    list.handle_gesture(DragGesture::Cancel)?;
    print_list(&list);

    // Edit the list while a drag is in flight; the drop is refused.
    println!("Dragging row 1 while another actor appends a row...");
    list.handle_gesture(DragGesture::Start { index: 1 })?;
    list.push(Keyed::new("Triage bugs"));
    match list.handle_gesture(DragGesture::Drop { index: 0 }) {
        Ok(_) => println!("unexpected: stale drop was applied"),
        Err(err) => println!("drop refused: {err}"),
    }
    print_list(&list);

    Ok(())
}
