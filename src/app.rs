use std::io::{BufWriter, stdout};

use crate::{
    common::error::AppError,
    domain::{account::RoutingNumber, bank::Bank},
    io::{reader, writer},
};

const DEFAULT_ROUTING_NUMBER: RoutingNumber = 10_010_010;

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];
    let routing_number = match args.get(2) {
        Some(raw) => raw
            .parse::<RoutingNumber>()
            .map_err(|e| AppError::Parse(format!("invalid routing number {raw}: {e}")))?,
        None => DEFAULT_ROUTING_NUMBER,
    };

    let file = std::fs::File::open(input_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    let commands = reader::read_commands(&mut reader);

    let mut bank = Bank::new(routing_number);
    let mut processor = crate::worker::processor::Processor::new();

    for command in commands {
        let command = command.map_err(AppError::Parse)?;
        processor.process(&mut bank, command)?;
    }

    // After the script has run, write the final statement to stdout
    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    writer::write_statement(writer, bank.accounts())?;

    Ok(())
}
