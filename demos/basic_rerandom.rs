//! Example demonstrating memoized randomness.
//!
//! Run with: cargo run --example basic_rerandom

use rerandom::prelude::*;

fn main() {
    println!("=== Memoized Random Values ===\n");

    let mut instance = rerandom();
    for key in ["alice", "bob", "alice", "carol", "bob"] {
        println!("  {key:<6} -> {}", instance.invoke(key));
    }
    println!("  registry size: {}", instance.registry().len());

    println!("\n=== Unkeyed and Falsy Keys ===\n");
    println!("  ()  -> {}", instance.invoke_unkeyed());
    println!("  ()  -> {}", instance.invoke_unkeyed());
    println!("  0   -> {}", instance.invoke(0));
    println!("  0   -> {}", instance.invoke(0));
    println!("  registry size: {} (unchanged)", instance.registry().len());

    println!("\n=== Stable IDs for List Keys ===\n");
    let mut ids = Rerandom::builder()
        .seed(2024)
        .key(KeyProcessor::stringify())
        .post(PostProcessor::new(|v, _| {
            Value::from(format!("id-{:06}", (v.as_f64().unwrap_or(0.0) * 1e6) as u64))
        }))
        .build();
    let first = ids.invoke(Value::list(["x", "y"]));
    let second = ids.invoke(Value::list(["x", "y"]));
    println!("  [x,y] -> {first}");
    println!("  [x,y] -> {second} (separate list, same string form)");

    println!("\n=== Rejected Generator ===\n");
    match instance.set_generator(Generator::new(|| Value::from("heads"))) {
        Ok(_) => println!("  accepted"),
        Err(err) => println!("  error: {err}"),
    }

    let m = instance.metrics();
    println!("\n=== Metrics ===\n");
    println!("  hits: {}  misses: {}  unkeyed: {}", m.hits, m.misses, m.unkeyed);
    println!("  hit rate: {:.2}", m.hit_rate());
}
