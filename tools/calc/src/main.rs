// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::ast::CalcError;
use clap::Parser;
use clap_derive::Parser;
use sprig_parser::{ParseOptions, parse_with_options};
use std::io::Read;
use tracing::debug;

mod ast;
mod grammar;

#[derive(Parser, Debug)]
struct Args {
    #[arg(
        value_name = "expression",
        help = "Arithmetic expression to evaluate; reads stdin when omitted"
    )]
    expression: Option<String>,

    #[arg(long, help = "Print the parse tree before the result", default_value = "false")]
    tree: bool,

    #[arg(long, help = "Print the parse tree as JSON", default_value = "false")]
    json: bool,

    #[arg(long, help = "Disable packrat memoization", default_value = "false")]
    no_packrat: bool,

    #[arg(long, help = "Enable debug logging", default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), eyre::Error> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(true)
        .with_max_level(if args.debug {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber)
        .expect("Unable to configure logging");

    grammar::install();

    let expression = match args.expression {
        Some(expression) => expression,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let options = ParseOptions {
        packrat: !args.no_packrat,
    };
    let Some(tree) = parse_with_options(&grammar::grammar, &expression, options) else {
        return Err(CalcError::UnparsableExpression.into());
    };
    debug!(nodes = tree.find_all().len(), "parsed");

    if args.tree {
        println!("{}", tree.pretty_print(0));
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }

    let expr = ast::build(&tree)?;
    println!("{}", ast::eval(&expr)?);
    Ok(())
}
