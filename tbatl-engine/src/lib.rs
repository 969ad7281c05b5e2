//! Checking Alternating-time Temporal Logic formulae on turn-based game graphs.
//!
//! Formula text is parsed with [parsing::parse_atl] into a [atl::Phi], and checked
//! in a state of a [game_structure::GameStructure] with an
//! [algorithms::ModelChecker].
//!
//! ```
//! use tbatl_engine::algorithms::ModelChecker;
//! use tbatl_engine::game_structure::GameBuilder;
//! use tbatl_engine::parsing::parse_phi;
//!
//! let mut builder = GameBuilder::new();
//! let q0 = builder.add_state("q0", ["oog"], "t");
//! let q1 = builder.add_state("q1", ["ig"], "c");
//! builder.connect(q0, &[q0, q1]).connect(q1, &[q0]);
//! let game = builder.build().unwrap();
//!
//! let formula = parse_phi("{t}<>(ig)").unwrap();
//! assert!(ModelChecker::new(&game).check(&formula, q0).unwrap());
//! ```
#[macro_use]
extern crate serde;
#[macro_use]
extern crate tracing;

pub mod algorithms;
pub mod atl;
pub mod game_structure;
pub mod parsing;
