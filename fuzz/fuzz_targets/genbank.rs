#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate gbff_io;
extern crate criterion;

use gbff_io::genbank::{self, Reader};
use gbff_io::parallel::parse_all;


fuzz_target!(|data: &[u8]| {
    let sequential: Vec<_> = Reader::with_capacity(data, 3).into_records().collect();

    // writing must not fail, and the output must be readable again
    let mut out = vec![];
    for rec in sequential.iter().flatten() {
        rec.write(&mut out).unwrap();
    }
    let text = String::from_utf8(out).unwrap();
    let written = genbank::parse_str(&text);

    // parallel parsing gives the same results in the same order
    match parse_all(Reader::with_capacity(data, 3), 2, 2) {
        Ok(outcome) => {
            assert_eq!(outcome.len(), sequential.len());
            for (p, s) in outcome.results().iter().zip(&sequential) {
                match (p, s) {
                    (Ok(p), Ok(s)) => assert_eq!(p, s),
                    (Err(p), Err(s)) => assert_eq!(p.to_string(), s.to_string()),
                    _ => panic!("results differ"),
                }
            }
        }
        Err(e) => {
            assert!(e.kind().is_fatal());
            assert!(matches!(sequential.last(), Some(Err(_))));
        }
    }
    criterion::black_box(written.is_ok());
});
