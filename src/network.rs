use std::collections::HashMap;
use std::fmt::Display;

use chrono::{NaiveTime, Timelike};

use crate::utils;

pub type RouteId = u32;
/// Length of time in whole minutes.
pub type Minutes = u32;

// Trams only run between these two times (inclusive).
pub const SERVICE_START: NaiveTime = utils::const_unwrap(NaiveTime::from_hms_opt(5, 55, 0));
pub const SERVICE_END: NaiveTime = utils::const_unwrap(NaiveTime::from_hms_opt(21, 21, 0));

/// A time of day at which trams are running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Returns `None` unless the time exists and falls inside the service window.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        (SERVICE_START..=SERVICE_END).contains(&time).then_some(Self(time))
    }

    /// Whole minutes from `self` until `later`. Negative if `later` is earlier.
    pub fn minutes_until(self, later: ClockTime) -> i64 {
        later.0.signed_duration_since(self.0).num_minutes()
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// A ticket price in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug)]
pub struct RouteStop {
    pub time: ClockTime,
    pub name: Box<str>,
}

/// A tram line: stops in the order they are served, with strictly increasing times.
#[derive(Debug)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    /// Callers are expected to have checked the ordering and uniqueness of the stops.
    pub(crate) fn from_stops(stops: Vec<RouteStop>) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0].time < w[1].time));
        Self { stops }
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn time_at(&self, stop: &str) -> Option<ClockTime> {
        self.stops.iter().find(|s| &*s.name == stop).map(|s| s.time)
    }
}

#[derive(Debug)]
pub struct Ticket {
    pub name: Box<str>,
    pub price: Price,
    pub validity: Minutes,
}

impl Ticket {
    pub fn new(name: &str, price: Price, validity: Minutes) -> Self {
        Self { name: name.into(), price, validity }
    }
}

/// The timetable and price list, both append-only.
#[derive(Default)]
pub struct Network {
    routes: HashMap<RouteId, Route>,
    tickets: Vec<Ticket>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub fn has_route(&self, id: RouteId) -> bool {
        self.routes.contains_key(&id)
    }

    /// Returns `false` (and leaves the table untouched) if the id is already taken.
    pub fn add_route(&mut self, id: RouteId, route: Route) -> bool {
        if self.has_route(id) {
            return false;
        }
        self.routes.insert(id, route);
        true
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn has_ticket(&self, name: &str) -> bool {
        self.tickets.iter().any(|ticket| &*ticket.name == name)
    }

    /// Returns `false` (and leaves the price list untouched) if the name is already taken.
    pub fn add_ticket(&mut self, ticket: Ticket) -> bool {
        if self.has_ticket(&ticket.name) {
            return false;
        }
        self.tickets.push(ticket);
        true
    }

    pub fn num_routes(&self) -> usize { self.routes.len() }

    pub fn num_tickets(&self) -> usize { self.tickets.len() }
}
