use std::sync::Arc;

use wayline::{InputKind, SchemaBuilder, Session, SubmitError};

fn main() {
    let schema = Arc::new(
        SchemaBuilder::new()
            .node("built", "When was the property built?", InputKind::Date, |n| {
                n.path("answer < 1990-01-01", "asbestos")
                    .path("default", "zip")
            })
            .node("asbestos", "Describe any asbestos findings.", InputKind::Text, |n| {
                n.path("default", "zip")
            })
            .node("zip", "Postcode?", InputKind::Text, |n| n.pattern(r"\d{5}"))
            .compile()
            .expect("failed to compile schema"),
    );

    let mut session = Session::new(schema);
    session.start().expect("session starts once");

    // An ISO string is accepted for a date node and normalized to a date.
    let node = session
        .submit_answer("1975-06-01")
        .expect("valid date")
        .expect("survey continues");
    println!("Branched to: {}", node.id());

    session
        .submit_answer("fibro sheeting in the garage")
        .expect("text accepted");

    // A pattern violation is recoverable: the session stays on the node.
    match session.submit_answer("not-a-postcode") {
        Err(SubmitError::Answer(e)) => println!("Rejected: {e}"),
        other => panic!("expected a validation error, got {other:?}"),
    }
    let done = session.submit_answer("90210").expect("pattern matches");
    assert!(done.is_none());

    println!("Answers:");
    for (id, answer) in session.answers() {
        println!("  {id} = {answer}");
    }
}
