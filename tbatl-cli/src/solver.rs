use std::time::Instant;

use humantime::format_duration;

use tbatl_engine::algorithms::ModelChecker;
use tbatl_engine::atl::Phi;
use tbatl_engine::game_structure::{GameStructure, StateIdx, TurnBasedGame};

use crate::options::CliOptions;

/// Check subcommand.
/// Checks the formula in the requested state, or in every state of the game.
pub fn solver(game: TurnBasedGame, formula: Phi, options: &CliOptions) -> Result<(), String> {
    info!(
        size = formula.size(),
        depth = formula.depth(),
        path_qualifiers = formula.path_qualifier_count(),
        "formula metrics"
    );

    let mut checker = ModelChecker::new(&game);
    if let Some(limit) = options.max_depth {
        checker = checker.with_depth_limit(limit);
    }

    let states = match &options.state {
        Some(name) => vec![game
            .state_by_name(name)
            .ok_or_else(|| format!("The game has no state named '{}'", name))?],
        None => game.states(),
    };

    if !options.quiet {
        println!("Checking the formula: {}", formula);
    }

    let now = Instant::now();
    let results = checker
        .check_all_parallel(&formula, &states, options.threads)
        .map_err(|err| format!("Model checking failed. {}", err))?;

    if !options.quiet {
        println!(
            "Time elapsed model checking: {}ms ({})",
            now.elapsed().as_millis(),
            format_duration(now.elapsed())
        );
        print_results(&game, &states, &results);
    }
    Ok(())
}

fn print_results(game: &TurnBasedGame, states: &[StateIdx], results: &[bool]) {
    for (&state, satisfied) in states.iter().zip(results) {
        println!("{}: {}", game.state_name(state), satisfied);
    }
    if states.len() > 1 {
        println!(
            "Formula holds in all states: {}",
            results.iter().all(|&satisfied| satisfied)
        );
    }
}
