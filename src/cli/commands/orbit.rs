//! Orbit command - Show the symmetry orbit and canonical key of a board

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    tictactoe::{Board, SymmetryGroup, canonical_key, encode_cells, parse_cells},
};

#[derive(Parser, Debug)]
#[command(about = "Show the symmetry orbit of a board")]
pub struct OrbitArgs {
    /// Board as 9 characters, row-major: `X`, `O`, and `.`/`_` for empty
    pub board: String,

    /// Symmetry group to apply
    #[arg(long, value_enum, default_value_t = SymmetryGroup::Dihedral)]
    pub symmetry: SymmetryGroup,
}

/// Execute the orbit command
pub fn execute(args: OrbitArgs) -> Result<()> {
    let cells = parse_cells(&args.board)?;

    print_section("Symmetry Orbit");
    for transform in args.symmetry.transforms() {
        let image = transform.apply_to_cells(&cells);
        let label = format!(
            "rot {:>3}{}",
            transform.rotation,
            if transform.reflection { " + mirror" } else { "" }
        );
        print_kv(&label, &encode_cells(&image));
    }

    println!();
    print_kv("Canonical key", canonical_key(&cells, args.symmetry).as_str());
    match Board::winner_of(&cells) {
        Some(winner) => print_kv("Winner", &winner.to_string()),
        None if Board::legal_moves_of(&cells).is_empty() => print_kv("Winner", "none (draw)"),
        None => print_kv("Winner", "none"),
    }

    Ok(())
}
