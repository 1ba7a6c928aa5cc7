//! Walk through a short lesson in the terminal.
//!
//! Loads a preset, paints on it, then shows the same grid as digits and as
//! a flat stream. Run with `RUST_LOG=debug` to see the workspace log.

use anyhow::Result;
use pixelbits::adapters::{DigitAdapter, PixelAdapter};
use pixelbits::quiz::{EndOfTierPolicy, QuestionBank, QuizSession, Tier};
use pixelbits::Workspace;

fn main() -> Result<()> {
    env_logger::init();

    let mut ws = Workspace::with_defaults()?;
    ws.load_preset("smiley")?;

    println!("== pixels ==");
    println!("{}", PixelAdapter::readonly().render_text(ws.grid(), ws.highlight()));

    // paint a hat brim across row 0
    ws.pixel_down(0)?;
    for i in 1..8 {
        ws.pixel_enter(i, true)?;
    }
    ws.pixel_up();
    ws.hover(9);

    println!("\n== digits ==");
    println!("{}", DigitAdapter::readonly().render_text(ws.grid(), ws.highlight()));

    println!("\n== stream ==");
    println!("{}", ws.grid().to_stream());

    let stats = ws.stats();
    println!(
        "\n{}x{} = {} bits, {} ones, {} zeros",
        stats.side, stats.side, stats.total_bits, stats.ones, stats.zeros
    );

    let mut quiz = QuizSession::new(QuestionBank::builtin()?, EndOfTierPolicy::AdvanceToNextTier);
    quiz.select_tier(Tier::Hard);
    println!("\n{} {}", "★".repeat(quiz.tier().stars() as usize), quiz.current().prompt);
    println!("answer 64 -> {:?}", quiz.select_option("64")?);

    Ok(())
}
