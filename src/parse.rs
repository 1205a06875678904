use crate::journey::{Leg, Ride};
use crate::lex::{scan_number, scan_price, scan_stop_name, scan_ticket_name, scan_time, scan_validity};
use crate::network::{ClockTime, Network, Route, RouteId, RouteStop, Ticket};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed route number.")]
    MalformedRouteId,
    #[error("Route already exists.")]
    DuplicateRoute,
    #[error("Malformed stop time.")]
    MalformedStopTime,
    #[error("Malformed stop name.")]
    MalformedStopName,
    #[error("Stop times are not strictly increasing.")]
    NonMonotonicTime,
    #[error("Route visits the same stop twice.")]
    RevisitedStop,
    #[error("Route has no stops.")]
    EmptyRoute,
    #[error("Malformed ticket name.")]
    MalformedTicketName,
    #[error("Ticket already exists.")]
    DuplicateTicket,
    #[error("Malformed ticket price.")]
    MalformedPrice,
    #[error("Malformed ticket validity length.")]
    MalformedValidity,
    #[error("Ticket validity length is zero.")]
    ZeroValidity,
    #[error("Malformed query.")]
    MalformedQuerySyntax,
    #[error("Query has no legs.")]
    EmptyItinerary,
    #[error("Unknown line type.")]
    UnknownFirstCharacter,
}

pub type ParseResult<T> = Result<T, ParseError>;

fn expect_space(line: &str, pos: usize, error: ParseError) -> ParseResult<usize> {
    match line.as_bytes().get(pos) {
        Some(b' ') => Ok(pos + 1),
        _ => Err(error),
    }
}

/// Parses `<route-id> ( <time> <stop-name>)+`.
///
/// Nothing is added to `network` here; the returned route is inserted by the caller.
pub fn parse_route(line: &str, network: &Network) -> ParseResult<(RouteId, Route)> {
    let (id, mut pos) = scan_number(line, 0).ok_or(ParseError::MalformedRouteId)?;
    let id = RouteId::try_from(id).map_err(|_| ParseError::MalformedRouteId)?;
    if network.has_route(id) {
        return Err(ParseError::DuplicateRoute);
    }

    let mut stops: Vec<RouteStop> = Vec::new();
    let mut previous_time: Option<ClockTime> = None;
    while pos < line.len() {
        pos = expect_space(line, pos, ParseError::MalformedStopTime)?;
        let (time, end) = scan_time(line, pos).ok_or(ParseError::MalformedStopTime)?;
        if previous_time.is_some_and(|previous| time <= previous) {
            return Err(ParseError::NonMonotonicTime);
        }
        pos = expect_space(line, end, ParseError::MalformedStopTime)?;

        let (name, end) = scan_stop_name(line, pos).ok_or(ParseError::MalformedStopName)?;
        if stops.iter().any(|stop| &*stop.name == name) {
            return Err(ParseError::RevisitedStop);
        }
        pos = end;

        previous_time = Some(time);
        stops.push(RouteStop { time, name: name.into() });
    }

    if stops.is_empty() {
        return Err(ParseError::EmptyRoute);
    }
    Ok((id, Route::from_stops(stops)))
}

/// Parses `<ticket-name> <price> <validity>`.
pub fn parse_ticket(line: &str, network: &Network) -> ParseResult<Ticket> {
    let (name, pos) = scan_ticket_name(line, 0).ok_or(ParseError::MalformedTicketName)?;
    let pos = expect_space(line, pos, ParseError::MalformedTicketName)?;
    if network.has_ticket(name) {
        return Err(ParseError::DuplicateTicket);
    }

    let (price, end) = scan_price(line, pos).ok_or(ParseError::MalformedPrice)?;
    let pos = expect_space(line, end, ParseError::MalformedPrice)?;

    let (validity, end) = scan_validity(line, pos).ok_or_else(|| {
        // A lone `0` is a zero length, anything else starting with `0` is just malformed.
        if scan_number(line, pos) == Some((0, pos + 1)) {
            ParseError::ZeroValidity
        } else {
            ParseError::MalformedValidity
        }
    })?;
    if end != line.len() {
        return Err(ParseError::MalformedValidity);
    }

    Ok(Ticket::new(name, price, validity))
}

/// Parses `? <stop> <route> <stop> <route> ... <stop>`.
pub fn parse_query(line: &str) -> ParseResult<Ride> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'?') || bytes.len() <= 2 || bytes[1] != b' ' {
        return Err(ParseError::MalformedQuerySyntax);
    }

    let mut legs = Vec::new();
    let mut pos = 2;
    loop {
        let (stop, end) = scan_stop_name(line, pos).ok_or(ParseError::MalformedQuerySyntax)?;
        if end == line.len() {
            if legs.is_empty() {
                return Err(ParseError::EmptyItinerary);
            }
            return Ok(Ride::new(legs, stop));
        }
        // The separator may not be the last byte, something has to follow it.
        if end == line.len() - 1 {
            return Err(ParseError::MalformedQuerySyntax);
        }
        pos = expect_space(line, end, ParseError::MalformedQuerySyntax)?;

        let (route, end) = scan_number(line, pos).ok_or(ParseError::MalformedQuerySyntax)?;
        let route = RouteId::try_from(route).map_err(|_| ParseError::MalformedQuerySyntax)?;
        if end >= line.len() - 1 {
            return Err(ParseError::MalformedQuerySyntax);
        }
        pos = expect_space(line, end, ParseError::MalformedQuerySyntax)?;

        legs.push(Leg::new(stop, route));
    }
}
