use std::sync::Arc;
use std::thread;

use wayline::{InputKind, SchemaBuilder, Session};

fn main() {
    // One compiled schema, shared read-only by every session.
    let schema = Arc::new(
        SchemaBuilder::new()
            .node("score", "Rate the property 1-10.", InputKind::Number, |n| {
                n.range(1.0, 10.0)
                    .path("answer >= 7", "good")
                    .path("default", "bad")
            })
            .node("good", "What stood out?", InputKind::Text, |n| n)
            .node("bad", "What was wrong?", InputKind::Text, |n| n)
            .compile()
            .expect("failed to compile schema"),
    );

    let handles: Vec<_> = (1..=8_i32)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut session = Session::new(schema);
                session.start().expect("session starts once");
                session.submit_answer(f64::from(i)).expect("score in range");
                let branch = session.state().current_node_id.unwrap();
                session.submit_answer("noted").expect("text accepted");
                (i, branch)
            })
        })
        .collect();

    for handle in handles {
        let (score, branch) = handle.join().unwrap();
        println!("surveyor {score}: routed to '{branch}'");
    }
}
