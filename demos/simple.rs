use robdd::{BoolOp, Builder};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let builder = Builder::new();
    println!("builder = {:?}", builder);

    let x0 = builder.new_literal(0);
    println!("x0 = {}", x0);
    let x1 = builder.new_literal(1);
    println!("x1 = {}", x1);
    let x2 = builder.new_literal(2);
    println!("x2 = {}", x2);

    // (x0 and x1) or (x2 and (x1 or x0))
    let f = builder.apply(BoolOp::And, x0, x1)?;
    println!("f = {}", f);
    let g = builder.apply(BoolOp::And, x2, builder.apply(BoolOp::Or, x1, x0)?)?;
    println!("g = {}", g);
    let h = builder.apply(BoolOp::Or, f, g)?;
    println!("h = {} of size {}", h, h.size());

    println!("any_sat(h) = {:?}", h.any_sat());
    println!("sat_count(h) = {}", h.sat_count(3));

    let unsat = builder.apply(BoolOp::And, builder.constant(false), x0)?;
    println!("unsat = {} of size {}, any_sat = {:?}", unsat, unsat.size(), unsat.any_sat());

    println!("builder = {:?}", builder);
    Ok(())
}
