//! # tom-engine
//!
//! Tokenizer, stack-machine parser, dice/calc evaluators and canonical serializer for
//! TOM, the lightweight markup used in forum post bodies.
//!
//! File Layout
//!
//! Everything lives under [tom]. The pipeline stages are leaf-first:
//! src/tom
//!   ├── lexing        Raw text to tokens, with the input guards
//!   ├── parsing       Frame-stack parser, write and read configurations
//!   ├── preprocess    Write time: dice are rolled and frozen
//!   ├── prerender     Read time: frozen dice extracted, calc/calcn evaluated
//!   ├── serializer    Tree back to canonical text
//!   ├── render        Visitor contract for presentation layers, anchor scanning
//!   ├── formats       Output formats for the CLI (treeviz, text, json, yaml, markup)
//!   ├── config        Layered TOML configuration over embedded defaults
//!   ├── random        Injectable dice roller
//!   └── pipeline      The write, read and view-source paths wired together
//!
//! For testing helpers, see the [testing module](tom::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod tom;
