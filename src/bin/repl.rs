use dice_notation::{Context, ResultNode};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::default();
    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            match roll_line(line, &ctx) {
                Ok(out) => println!("{}", out),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn roll_line(line: &str, ctx: &Context) -> dice_notation::Result<String> {
    let expr = dice_notation::parse(line, ctx)?;
    let result = expr.evaluate()?;
    Ok(format!("{} = {}", result, result.value()))
}
