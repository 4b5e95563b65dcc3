use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use dempster_shafer::cli::mass_spec::{parse_mass_function, parse_reference_list};
use dempster_shafer::cli::opts::Cli;
use dempster_shafer::{CombinationRule, DiscreteElement, MassFunction, MaxKind, ReferenceList};

fn main() {
    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn run() -> Result<()> {
    let opt = Cli::parse();
    let refs = parse_reference_list(&opt.frame)?;

    let masses: Vec<MassFunction<DiscreteElement>> = opt
        .mass
        .iter()
        .map(|spec| parse_mass_function(spec, &refs))
        .collect::<Result<_>>()
        .context("invalid --mass")?;

    let rule: CombinationRule = opt.rule.into();

    let result = if masses.len() == 1 {
        masses.into_iter().next().expect("checked len == 1")
    } else if opt.parallel {
        combine_in_parallel(&masses, rule, opt.n_threads)?
    } else {
        MassFunction::combine(&masses, rule).context("combining mass functions")?
    };

    print_report(&refs, &result)?;
    Ok(())
}

/// Reduce `masses` in independent, roughly-even chunks in parallel, then
/// fold the partial results together sequentially with the same rule —
/// valid because every rule offered here is associative and commutative up
/// to floating-point tolerance.
fn combine_in_parallel(
    masses: &[MassFunction<DiscreteElement>],
    rule: CombinationRule,
    n_threads: usize,
) -> Result<MassFunction<DiscreteElement>> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
        .context("building Rayon thread pool")?;

    let n_chunks = rayon::current_num_threads().min(masses.len()).max(1);
    let chunk_size = masses.len().div_ceil(n_chunks);
    let chunks: Vec<&[MassFunction<DiscreteElement>]> = masses.chunks(chunk_size).collect();

    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("       {bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    let partials: Vec<MassFunction<DiscreteElement>> = chunks
        .par_iter()
        .map(|chunk| -> Result<MassFunction<DiscreteElement>> {
            let reduced = if chunk.len() == 1 {
                chunk[0].clone()
            } else {
                MassFunction::combine(chunk, rule)?
            };
            pb.inc(1);
            Ok(reduced)
        })
        .collect::<Result<_>>()?;

    pb.finish_with_message("| Finished reducing batch");

    if partials.len() == 1 {
        Ok(partials.into_iter().next().expect("checked len == 1"))
    } else {
        MassFunction::combine(&partials, rule).context("folding partial results")
    }
}

fn print_report(refs: &ReferenceList, result: &MassFunction<DiscreteElement>) -> Result<()> {
    println!("Focal elements:");
    print!("{}", result.to_display_string(refs)?);

    println!();
    println!("Induced measures (every focal, plus the full frame):");

    let mut queries: Vec<DiscreteElement> = result.focal_elements().map(|(e, _)| e.clone()).collect();
    let complete = DiscreteElement::complete(refs.size());
    if !queries.contains(&complete) {
        queries.push(complete);
    }

    for e in &queries {
        let name = e.to_display_string(refs)?;
        let bel = result.belief(e)?;
        let pl = result.plausibility(e)?;
        let q = result.commonality(e)?;
        let bet_p = result.bet_p(e).unwrap_or(f64::NAN);
        println!("  {name}: bel={bel:.6} pl={pl:.6} q={q:.6} betP={bet_p:.6}");
    }

    if let Ok(winner) = result.max(MaxKind::BetP) {
        println!();
        println!("Arg-max by pignistic probability: {}", winner.to_display_string(refs)?);
    }

    Ok(())
}
