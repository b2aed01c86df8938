//! Walk the lattice of a small box and print a few box combinations.
//!
//! Usage:
//!   cargo run -p hyperrect --example lattice_walk
//!   cargo run -p hyperrect --example lattice_walk -- backward

use hyperrect::api::{Compact, GridCursor, Logger, Vector};

fn main() {
    let backward = std::env::args().nth(1).as_deref() == Some("backward");
    let logger = Logger::new();
    let v = |c: &[f64]| Vector::new(c).unwrap();

    let a = Compact::new(&v(&[1.0, 0.0]), &v(&[2.0, 2.0]), 1e-4, Some(&logger)).unwrap();
    let b = Compact::new(&v(&[1.0, 2.0]), &v(&[2.0, 3.0]), 1e-4, Some(&logger)).unwrap();

    let step = v(&[0.5, 1.0]);
    let mut it = if backward {
        a.end_iter(&step).unwrap()
    } else {
        a.begin_iter(&step).unwrap()
    };
    println!("lattice of {a} with step {step} ({} points):", a.lattice_len(&step).unwrap());
    loop {
        println!("  {}", it.point());
        if it.step().is_err() {
            break;
        }
    }

    for (name, r) in [
        ("union", Compact::union(&a, &b, 1e-4, Some(&logger))),
        ("intersection", Compact::intersection(&a, &b, 1e-4, Some(&logger))),
        ("convex", Compact::convex(&a, &b, 1e-4, Some(&logger))),
    ] {
        match r {
            Ok(c) => println!("{name}: {c}"),
            Err(e) => println!("{name}: failed ({e})"),
        }
    }
    for rec in logger.records() {
        println!("logged: {} -> {}", rec.operation, rec.code);
    }
}
