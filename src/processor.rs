use std::borrow::Cow;
use std::fmt::Display;
use std::io::{BufRead, Write};

use log::{debug, info};

use crate::journey::{ride_time, Ride, RideError};
use crate::network::{Network, Ticket};
use crate::optimizer::{cheapest_tickets, TicketSet};
use crate::parse::{parse_query, parse_route, parse_ticket, ParseError};
use crate::utils::{is_digit, is_letter, trim_line_ending};

/// What gets printed in reply to a ride query.
pub enum Answer<'a> {
    Purchase { set: TicketSet, tickets: &'a [Ticket] },
    NoSolution,
    WaitAt(Box<str>),
}

impl Answer<'_> {
    pub fn tickets_sold(&self) -> usize {
        match self {
            Answer::Purchase { set, .. } => set.len(),
            _ => 0,
        }
    }
}

impl Display for Answer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Purchase { set, tickets } => {
                write!(f, "! ")?;
                for (i, &idx) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", tickets[idx].name)?;
                }
                Ok(())
            }
            Answer::NoSolution => write!(f, ":-|"),
            Answer::WaitAt(stop) => write!(f, ":-( {stop}"),
        }
    }
}

/// Answers a ride query. `None` means the ride cannot be made at all.
pub fn answer_query<'a>(ride: &Ride, network: &'a Network) -> Option<Answer<'a>> {
    match ride_time(ride, network) {
        Ok(duration) => {
            let tickets = network.tickets();
            Some(match cheapest_tickets(duration, tickets) {
                Some(set) => Answer::Purchase { set, tickets },
                None => Answer::NoSolution,
            })
        }
        Err(RideError::WaitAt(stop)) => Some(Answer::WaitAt(stop)),
        Err(RideError::Impossible) => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Route,
    Ticket,
    Query,
}

/// Decides what a non-empty line describes from its first character.
pub fn classify(line: &str) -> Result<LineKind, ParseError> {
    match line.as_bytes().first() {
        Some(&c) if is_digit(c) => Ok(LineKind::Route),
        Some(&c) if is_letter(c) || c == b' ' => Ok(LineKind::Ticket),
        Some(b'?') => Ok(LineKind::Query),
        _ => Err(ParseError::UnknownFirstCharacter),
    }
}

/// Reads instructions line by line, keeping the network and the number of tickets sold.
#[derive(Default)]
pub struct Processor {
    network: Network,
    tickets_sold: u64,
    line_number: usize,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn tickets_sold(&self) -> u64 {
        self.tickets_sold
    }

    /// Handles one input line. Answers go to `out`, diagnostics to `err`.
    pub fn process_line(&mut self, line: &str, out: &mut impl Write, err: &mut impl Write) -> std::io::Result<()> {
        let line = trim_line_ending(line);
        // Empty lines are skipped and do not count towards line numbers.
        if line.is_empty() {
            return Ok(());
        }
        self.line_number += 1;

        match self.handle(line, out) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Line {}: the ride is impossible.", self.line_number);
                self.report(line, err)?;
            }
            Err(LineError::Parse(e)) => {
                debug!("Line {}: {e}", self.line_number);
                self.report(line, err)?;
            }
            Err(LineError::Io(e)) => return Err(e),
        }
        Ok(())
    }

    // Returns `Ok(false)` for a well formed query that cannot be answered.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool, LineError> {
        match classify(line)? {
            LineKind::Route => {
                let (id, route) = parse_route(line, &self.network)?;
                debug!("Adding route {} with {} stops.", id, route.stops().len());
                let added = self.network.add_route(id, route);
                debug_assert!(added, "parse_route lets duplicate route {id} through");
            }
            LineKind::Ticket => {
                let ticket = parse_ticket(line, &self.network)?;
                debug!("Adding ticket '{}' for {} valid for {} minutes.", ticket.name, ticket.price, ticket.validity);
                let added = self.network.add_ticket(ticket);
                debug_assert!(added, "parse_ticket lets a duplicate ticket through");
            }
            LineKind::Query => {
                let ride = parse_query(line)?;
                let Some(answer) = answer_query(&ride, &self.network) else {
                    return Ok(false);
                };
                writeln!(out, "{answer}")?;
                self.tickets_sold += answer.tickets_sold() as u64;
            }
        }
        Ok(true)
    }

    fn report(&self, line: &str, err: &mut impl Write) -> std::io::Result<()> {
        writeln!(err, "Error in line {}: {}", self.line_number, line)
    }

    /// Processes all of `input`, then prints the number of tickets sold.
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write, err: &mut impl Write) -> std::io::Result<u64> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            if buffer.last() == Some(&b'\n') {
                buffer.pop();
            }
            let line: Cow<str> = String::from_utf8_lossy(&buffer);
            self.process_line(&line, out, err)?;
        }

        writeln!(out, "{}", self.tickets_sold)?;
        info!(
            "Processed {} lines: {} routes, {} tickets, {} tickets sold.",
            self.line_number,
            self.network.num_routes(),
            self.network.num_tickets(),
            self.tickets_sold
        );
        Ok(self.tickets_sold)
    }
}

enum LineError {
    Parse(ParseError),
    Io(std::io::Error),
}

impl From<ParseError> for LineError {
    fn from(e: ParseError) -> Self {
        LineError::Parse(e)
    }
}

impl From<std::io::Error> for LineError {
    fn from(e: std::io::Error) -> Self {
        LineError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(processor: &mut Processor, lines: &[&str]) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        for line in lines {
            processor.process_line(line, &mut out, &mut err).unwrap();
        }
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(classify("1 6:00 A"), Ok(LineKind::Route));
        assert_eq!(classify("Day 1.00 5"), Ok(LineKind::Ticket));
        assert_eq!(classify(" Day 1.00 5"), Ok(LineKind::Ticket));
        assert_eq!(classify("? A 1 B"), Ok(LineKind::Query));
        assert_eq!(classify("#comment"), Err(ParseError::UnknownFirstCharacter));
        assert_eq!(classify("_A"), Err(ParseError::UnknownFirstCharacter));
    }

    #[test]
    fn answer_formats() {
        let tickets = [
            Ticket::new("Day", crate::network::Price::from_cents(100), 5),
            Ticket::new("Week", crate::network::Price::from_cents(100), 5),
        ];
        let set: TicketSet = [0, 1, 0].into_iter().collect();
        let purchase = Answer::Purchase { set, tickets: &tickets };
        assert_eq!(purchase.to_string(), "! Day; Week; Day");
        assert_eq!(purchase.tickets_sold(), 3);
        assert_eq!(Answer::NoSolution.to_string(), ":-|");
        assert_eq!(Answer::WaitAt("Centrum".into()).to_string(), ":-( Centrum");
        assert_eq!(Answer::NoSolution.tickets_sold(), 0);
    }

    #[test]
    fn rejected_lines_leave_no_trace() {
        let mut processor = Processor::new();
        let (out, err) = feed(&mut processor, &["1 6:00 A 6:05 B 6:04 C", "Day 1.00 0", "? A 1 B"]);
        assert_eq!(out, "");
        assert_eq!(err, "Error in line 1: 1 6:00 A 6:05 B 6:04 C\nError in line 2: Day 1.00 0\nError in line 3: ? A 1 B\n");
        assert_eq!(processor.network().num_routes(), 0);
        assert_eq!(processor.network().num_tickets(), 0);
    }

    #[test]
    fn duplicates_are_reported_once_and_not_stored() {
        let mut processor = Processor::new();
        let (_, err) = feed(&mut processor, &["1 6:00 A", "1 7:00 B", "Day 1.00 5", "Day 2.00 9"]);
        assert_eq!(err, "Error in line 2: 1 7:00 B\nError in line 4: Day 2.00 9\n");
        assert_eq!(processor.network().num_routes(), 1);
        assert!(processor.network().get_route(1).unwrap().time_at("B").is_none());
        assert_eq!(processor.network().num_tickets(), 1);
    }

    #[test]
    fn empty_lines_are_not_counted() {
        let mut processor = Processor::new();
        let (_, err) = feed(&mut processor, &["", "\r", "@", "", "%"]);
        assert_eq!(err, "Error in line 1: @\nError in line 2: %\n");
    }

    #[test]
    fn crlf_is_stripped() {
        let mut processor = Processor::new();
        let (out, err) = feed(&mut processor, &["1 5:55 A 5:57 B\r", "Ten minutes 5.00 10\r", "? A 1 B\r"]);
        assert_eq!(err, "");
        assert_eq!(out, "! Ten minutes\n");
        assert_eq!(processor.tickets_sold(), 1);
    }

    #[test]
    fn run_prints_final_count() {
        let input = "1 5:55 A 5:57 B\nTen minutes 5.00 10\n? A 1 B\n? A 1 B";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let sold = Processor::new().run(input.as_bytes(), &mut out, &mut err).unwrap();
        assert_eq!(sold, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "! Ten minutes\n! Ten minutes\n2\n");
        assert!(err.is_empty());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let input: &[u8] = b"\xff\xfe\n1 5:55 Z\xc3\xa9\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        Processor::new().run(input, &mut out, &mut err).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n");
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("Error in line 1: "));
        assert!(err.contains("Error in line 2: 1 5:55 Z\u{e9}\n"));
    }
}
