#[macro_use]
extern crate tracing;

use std::process::exit;

use tbatl_engine::game_structure::GameStructure;

use crate::args::parse_arguments;
use crate::load::{load_formula, load_model};
use crate::options::{OutputFormat, SubcommandOption};
use crate::solver::solver;

mod args;
mod load;
mod options;
mod solver;

#[tracing::instrument]
fn main() {
    if let Err(msg) = main_inner() {
        println!("{}", msg);
        exit(1);
    }
}

fn main_inner() -> Result<(), String> {
    let options = parse_arguments()?;

    match options.subcommand {
        SubcommandOption::Check => {
            let game = load_model(options.model_path.as_str())?;
            let formula = load_formula(
                options.formula_path.as_str(),
                options.formula_explicit_format,
            )?;
            debug!(
                states = game.state_count(),
                players = ?game.players(),
                "loaded game"
            );
            solver(game, formula, &options)?;
        }
        SubcommandOption::Parse => {
            let formula = load_formula(
                options.formula_path.as_str(),
                options.formula_explicit_format,
            )?;
            match options.output_format {
                OutputFormat::Atl => println!("{}", formula),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&formula)
                        .map_err(|err| format!("Failed to serialize formula. {}", err))?;
                    println!("{}", json);
                }
            }
        }
    };
    Ok(())
}
