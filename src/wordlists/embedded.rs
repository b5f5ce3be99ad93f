//! Embedded word list
//!
//! Compiled into the binary at build time from `data/answers.txt`.

include!(concat!(env!("OUT_DIR"), "/answers.rs"));
