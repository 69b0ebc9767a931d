use anyhow::{anyhow, Result};
use banmen::movegen::LegalType;
use banmen::movetypes::MoveList;
use banmen::position::Position;

// Prints the start position, or a position given as SFEN arguments,
// together with its hash key and legal moves.
fn run() -> Result<()> {
    banmen::initialize();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pos = if args.is_empty() {
        Position::new()
    } else {
        Position::new_from_sfen(&args.join(" "))?
    };
    pos.print();
    println!("key: {:#018x}", pos.key().0);
    let mut mlist = MoveList::new();
    mlist.generate::<LegalType>(&pos);
    println!("legal moves: {}", mlist.len());
    let usi: Vec<String> = mlist.iter().map(|m| m.to_usi_string()).collect();
    println!("{}", usi.join(" "));
    Ok(())
}

fn main() -> Result<()> {
    std::thread::Builder::new()
        .stack_size(banmen::stack_size::STACK_SIZE)
        .spawn(run)?
        .join()
        .map_err(|_| anyhow!("worker thread panicked"))?
}
