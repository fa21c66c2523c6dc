use clap::Parser;
use std::process::ExitCode;
use triad::ast;
use triad::dfa::Dfa;
use triad::nfa::Nfa;
use triad::parser;

/// Parse a pattern, match it against a subject, and show how all three
/// matching strategies agree.
#[derive(Debug, Parser)]
#[command(name = "triad", version, about)]
struct Cli {
    /// Pattern in triad's regex syntax, e.g. `a(bcd)?e`
    pattern: String,
    /// Text to match the pattern against
    subject: String,
    /// Suppress the diagnostic dump; print only the three match booleans
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tree = match parser::parse(&cli.pattern) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let derivative_match = ast::matches(&tree, &cli.subject);
    let nfa = Nfa::from_ast(&tree);
    let nfa_match = nfa.matches(&cli.subject);
    let dfa = Dfa::from_ast(&tree);
    let dfa_match = dfa.matches(&cli.subject);

    if !cli.quiet {
        println!("pattern:    {}", cli.pattern);
        match ast::to_pattern(&tree) {
            Ok(rendered) => println!("re-rendered: {rendered}"),
            Err(e) => println!("re-rendered: <unprintable: {e}>"),
        }
        println!("ast:        {tree:#?}");
        match ast::to_english(&tree) {
            Ok(english) => println!("english:    {english}"),
            Err(e) => println!("english:    <unprintable: {e}>"),
        }
    }

    println!("derivative matches: {derivative_match}");
    println!("nfa matches:        {nfa_match}");
    println!("dfa matches:        {dfa_match}");

    if !cli.quiet {
        println!(
            "subset matches in subject: {:?}",
            dfa.find_subset_matches(&cli.subject)
        );
    }

    ExitCode::SUCCESS
}
