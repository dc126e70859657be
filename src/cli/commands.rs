//! Command dispatch for the rsgraph binary

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::LineService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{sample, FormulaTree, SampleRange, Viewport};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // Completions must work even with a broken config file
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    match command {
        Commands::Check { formulas } => _check(formulas),
        Commands::Eval { formula, inputs } => _eval(&settings, formula, inputs),
        Commands::Table {
            formula,
            start,
            end,
            step,
            inverse,
        } => {
            let range = settings.sample_range(*start, *end, *step)?;
            _table(&settings, formula, &range, *inverse)
        }
        Commands::Render {
            formulas,
            min_x,
            max_x,
            scale,
            inverse,
        } => {
            let viewport = settings.viewport(*min_x, *max_x, *scale)?;
            _render(&settings, formulas, &viewport, *inverse)
        }
        Commands::Tree { formula } => _tree(formula),
        Commands::Config { command } => _config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn build_valid(formula: &str) -> CliResult<FormulaTree> {
    Ok(FormulaTree::build(formula).require_valid()?)
}

#[instrument]
fn _check(formulas: &[String]) -> CliResult<()> {
    let mut invalid = 0;
    for formula in formulas {
        let tree = FormulaTree::build(formula);
        if tree.is_valid() {
            output::success(&format!("{}  ({})", formula, tree.normalized()));
        } else {
            invalid += 1;
            output::failure(formula);
        }
    }
    if invalid > 0 {
        return Err(CliError::InvalidFormulas {
            invalid,
            total: formulas.len(),
        });
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _eval(settings: &Settings, formula: &str, inputs: &[f64]) -> CliResult<()> {
    let tree = build_valid(formula)?;
    for &input in inputs {
        output::info(&format!(
            "{}\t{}",
            output::number(input, settings.precision),
            output::number(tree.evaluate(input), settings.precision)
        ));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _table(settings: &Settings, formula: &str, range: &SampleRange, inverse: bool) -> CliResult<()> {
    let tree = build_valid(formula)?;
    let points = sample(&tree, range, inverse)?;
    output::header(&if inverse {
        format!("f(y)\ty    [x = {}]", formula)
    } else {
        format!("x\tf(x)    [y = {}]", formula)
    });
    for point in points {
        output::info(&format!(
            "{}\t{}",
            output::number(point.x, settings.precision),
            output::number(point.y, settings.precision)
        ));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _render(
    settings: &Settings,
    formulas: &[String],
    viewport: &Viewport,
    inverse: bool,
) -> CliResult<()> {
    let mut lines = LineService::new();
    for formula in formulas {
        let id = lines.add_line();
        if !lines.set_formula(id, formula, inverse)? {
            output::warning(&format!("skipping invalid formula: {}", formula));
        }
    }

    let rendered = lines.render(
        viewport,
        settings.viewport.overshoot,
        settings.viewport.pixel_step,
    )?;
    for line in rendered {
        output::header(&format!("{} ({} points)", line.formula, line.points.len()));
        let rows = line
            .points
            .iter()
            .map(|p| {
                format!(
                    "{}\t{}",
                    output::number(p.x, settings.precision),
                    output::number(p.y, settings.precision)
                )
            })
            .join("\n");
        output::info(&rows);
    }
    Ok(())
}

#[instrument]
fn _tree(formula: &str) -> CliResult<()> {
    let tree = FormulaTree::build(formula);
    match tree.to_termtree() {
        Some(rendered) => output::info(&rendered),
        None => output::info("<empty>"),
    }
    output::detail(&format!(
        "normalized: {}, depth: {}",
        tree.normalized(),
        tree.nodes().depth()
    ));
    if tree.is_valid() {
        output::success("valid");
        Ok(())
    } else {
        output::failure("invalid");
        Err(CliError::InvalidFormulas {
            invalid: 1,
            total: 1,
        })
    }
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}
