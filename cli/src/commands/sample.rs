//! Trajectory sampling command: CSV on stdout for external plotting.

use anyhow::Result;
use std::io::{self, BufWriter, Write};
use vortex::{Chen, Henon, Logistic, Lorenz, Sine, Tent};

use super::Map;

/// Default initial condition used for every dimension.
const X0: f64 = 0.1;

/// Dump `count` samples of `map` as CSV.
pub fn sample(map: Map, count: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match map {
        Map::Tent => {
            let mut x = vec![0.0f64; count];
            Tent::default().generate(&mut x, X0);
            dump1(&mut out, &x)?;
        }
        Map::Logistic => {
            let mut x = vec![0.0f64; count];
            Logistic::default().generate(&mut x, X0);
            dump1(&mut out, &x)?;
        }
        Map::Sine => {
            let mut x = vec![0.0f64; count];
            Sine::default().generate(&mut x, X0);
            dump1(&mut out, &x)?;
        }
        Map::Henon => {
            let mut x = vec![0.0f64; count];
            let mut y = vec![0.0f64; count];
            Henon::default().generate(&mut x, &mut y, X0, X0)?;
            writeln!(out, "x,y")?;
            for (a, b) in x.iter().zip(&y) {
                writeln!(out, "{a},{b}")?;
            }
        }
        Map::Lorenz => {
            let mut x = vec![0.0f64; count];
            let mut y = vec![0.0f64; count];
            let mut z = vec![0.0f64; count];
            Lorenz::default().generate(&mut x, &mut y, &mut z, X0, X0, X0)?;
            dump3(&mut out, &x, &y, &z)?;
        }
        Map::Chen => {
            let mut x = vec![0.0f64; count];
            let mut y = vec![0.0f64; count];
            let mut z = vec![0.0f64; count];
            Chen::default().generate(&mut x, &mut y, &mut z, X0, X0, X0)?;
            dump3(&mut out, &x, &y, &z)?;
        }
    }

    Ok(())
}

fn dump1<W: Write>(out: &mut W, x: &[f64]) -> io::Result<()> {
    writeln!(out, "x")?;
    for v in x {
        writeln!(out, "{v}")?;
    }
    Ok(())
}

fn dump3<W: Write>(out: &mut W, x: &[f64], y: &[f64], z: &[f64]) -> io::Result<()> {
    writeln!(out, "x,y,z")?;
    for ((a, b), c) in x.iter().zip(y).zip(z) {
        writeln!(out, "{a},{b},{c}")?;
    }
    Ok(())
}
