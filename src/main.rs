use anyhow::{Context, Result, bail};
use tartan_chess::{Chessboard, PieceKind, Position};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Split a coordinate pair such as `e2e4` or `e7e8q` into origin, destination and promotion kind.
fn parse_move(text: &str) -> Result<(Position, Position, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("expected a coordinate pair like e2e4 or e7e8q, got {text:?}");
    }
    let from: Position = text[0..2].parse()?;
    let to: Position = text[2..4].parse()?;
    let promotion = match text[4..].chars().next() {
        Some(letter) => Some(
            PieceKind::from_letter(letter)
                .with_context(|| format!("unknown promotion letter {letter:?}"))?,
        ),
        None => None,
    };
    Ok((from, to, promotion))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut board = Chessboard::standard();
    info!(status = %board.status(), "tartan starting");

    for arg in std::env::args().skip(1) {
        let (from, to, promotion) =
            parse_move(&arg).with_context(|| format!("failed to read move {arg}"))?;
        let status = board
            .apply_turn(from, to, promotion)
            .with_context(|| format!("move {arg} rejected"))?;
        info!(turn = %arg, %status, "applied");
    }

    println!("{board}");
    println!("{}", board.status());
    Ok(())
}
