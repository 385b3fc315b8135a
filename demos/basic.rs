use std::sync::Arc;

use wayline::{InputKind, SchemaBuilder, Session};

fn main() {
    // Define a small survey
    let schema = Arc::new(
        SchemaBuilder::new()
            .node("owns", "Do you own the property?", InputKind::Boolean, |n| {
                n.path("answer == true", "rooms").path("default", "landlord")
            })
            .node("rooms", "How many rooms does it have?", InputKind::Number, |n| {
                n.range(1.0, 50.0).path("default", "finish")
            })
            .node("landlord", "Who is the landlord?", InputKind::Text, |n| n)
            .compile()
            .expect("failed to compile schema"),
    );

    println!("{schema}");

    // Walk it with canned answers
    let mut session = Session::new(schema);
    let first = session.start().expect("session starts once");
    println!("Q: {}", first.prompt());

    let second = session
        .submit_answer(true)
        .expect("boolean answer accepted")
        .expect("survey continues");
    println!("Q: {}", second.prompt());

    let done = session.submit_answer(4.0).expect("number in range");
    assert!(done.is_none());

    println!("Complete: {}", session.is_complete());
    for (id, answer) in session.answers() {
        println!("  {id} = {answer}");
    }
}
