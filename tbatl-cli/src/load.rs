use std::fs::File;
use std::io::Read;

use tbatl_engine::atl::Phi;
use tbatl_engine::game_structure::TurnBasedGame;
use tbatl_engine::parsing::errors::ErrorLog;
use tbatl_engine::parsing::parse_atl;

use crate::options::FormulaFormat;

/// Load a game from a JSON file. The graph is validated while deserializing.
pub fn load_model(model_path: &str) -> Result<TurnBasedGame, String> {
    let content = read_file(model_path, "model")?;
    serde_json::from_str(content.as_str())
        .map_err(|err| format!("Failed to deserialize input model. {}", err))
}

/// Load a formula from a file. The format is inferred if not specified.
pub fn load_formula(
    formula_path: &str,
    formula_format: Option<FormulaFormat>,
) -> Result<Phi, String> {
    let formula_format = formula_format.map_or_else(|| infer_formula_format(formula_path), Ok)?;
    let content = read_file(formula_path, "formula")?;

    match formula_format {
        FormulaFormat::Json => {
            let formula = serde_json::from_str(content.as_str())
                .map_err(|err| format!("Failed to deserialize input formula. {}", err))?;

            Ok(formula)
        }
        FormulaFormat::Atl => {
            // Formula files usually end with a newline, which is not part of the formula
            let content = content.trim_end();
            let errors = ErrorLog::new();
            parse_atl(content, &errors).ok_or_else(|| {
                format!(
                    "Invalid ATL formula provided:\n{}",
                    errors.to_string(content)
                )
            })
        }
    }
}

fn read_file(path: &str, what: &str) -> Result<String, String> {
    let mut file =
        File::open(path).map_err(|err| format!("Failed to open input {}. {}", what, err))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|err| format!("Failed to read input {}. {}", what, err))?;
    Ok(content)
}

/// Infer the formula format from the file extension
fn infer_formula_format(formula_path: &str) -> Result<FormulaFormat, String> {
    if formula_path.ends_with(".atl") {
        Ok(FormulaFormat::Atl)
    } else if formula_path.ends_with(".json") {
        Ok(FormulaFormat::Json)
    } else {
        Err("Cannot infer formula format from the file extension. You can specify it with '--formula-format=FORMULA_FORMAT'".to_string())
    }
}
