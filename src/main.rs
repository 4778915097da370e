#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

//! Interactive console front-end for the solver.
//!
//! Prompts for an expression, differentiates it, runs [`find_root`] and
//! renders the report and the convergence plot. Parse and input errors are
//! surfaced with a retry prompt; only I/O failures abort the program.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use raphson::{find_root, render_plot, render_report, Expr, DEFAULT_MAX_ITER, DEFAULT_TOL};

const PLOT_LOCATION: &str = "newton_raphson_results.png";

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{}", "=".repeat(64));
    println!("{:^64}", "NEWTON-RAPHSON ROOT FINDER");
    println!("{}", "=".repeat(64));
    println!();
    println!("Finds a real root of f(x) by iterating x_next = x - f(x)/f'(x),");
    println!("with the derivative computed symbolically from your input.");
    println!();
    println!("Enter the function in conventional notation.");
    println!("Examples: x**2 - 4, sin(x) + x**2, exp(x) - 2");

    let f_expr = prompt_expr(&mut input)?;
    let df_expr = f_expr.diff();
    println!("\nThe computed derivative is: {df_expr}");

    let x0: f64 = prompt_parsed(&mut input, "\nEnter the initial guess (x0): ")?;

    let defaults = format!(
        "\nUse the default tolerance ({DEFAULT_TOL:e}) and iteration cap ({DEFAULT_MAX_ITER})? (y/n): "
    );
    let (tol, max_iter) = if prompt_line(&mut input, &defaults)?.eq_ignore_ascii_case("y") {
        (DEFAULT_TOL, DEFAULT_MAX_ITER)
    } else {
        let tol = loop {
            let tol: f64 = prompt_parsed(&mut input, "Enter the tolerance: ")?;
            if tol > 0.0 && tol.is_finite() {
                break tol;
            }
            println!("The tolerance must be positive and finite, try again.");
        };
        let max_iter = prompt_parsed(&mut input, "Enter the maximum number of iterations: ")?;
        (tol, max_iter)
    };

    let f = f_expr.clone().lambdify();
    let df = df_expr.lambdify();
    let result = find_root(&f, &df, x0, tol, max_iter)?;

    println!("\n{}", render_report(&result, &f));

    println!("To generate the plot, enter the x-axis bounds:");
    let (x_min, x_max) = loop {
        let x_min: f64 = prompt_parsed(&mut input, "Minimum x: ")?;
        let x_max: f64 = prompt_parsed(&mut input, "Maximum x: ")?;
        if x_min < x_max {
            break (x_min, x_max);
        }
        println!("The minimum must be strictly below the maximum, try again.");
    };

    render_plot(&f, result.root, &result.trace, x_min, x_max, PLOT_LOCATION);
    println!("\nPlot saved as '{PLOT_LOCATION}'");

    Ok(())
}

fn prompt_line(input: &mut impl BufRead, message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush().context("flushing the prompt")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    anyhow::ensure!(read != 0, "input closed");
    Ok(line.trim().to_owned())
}

/// Prompt until the line parses as a `T`.
fn prompt_parsed<T>(input: &mut impl BufRead, message: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    loop {
        let line = prompt_line(input, message)?;
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(err) => println!("Invalid value ({err}), try again."),
        }
    }
}

fn prompt_expr(input: &mut impl BufRead) -> anyhow::Result<Expr> {
    loop {
        let line = prompt_line(input, "\nEnter the function f(x): ")?;
        match Expr::parse(&line) {
            Ok(expr) => return Ok(expr),
            Err(err) => println!("Cannot parse the function ({err}), try again."),
        }
    }
}
