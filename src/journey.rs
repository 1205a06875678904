use log::trace;

use crate::network::{ClockTime, Minutes, Network, RouteId};

// Ticket coverage is inclusive of both the first and the last minute of the ride.
pub const RIDE_TIME_ADJUSTMENT: Minutes = 1;

/// Board `route` at `stop` and ride it to the next stop of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub stop: Box<str>,
    pub route: RouteId,
}

impl Leg {
    pub fn new(stop: &str, route: RouteId) -> Self {
        Self { stop: stop.into(), route }
    }
}

/// A rider's itinerary: at least one leg, then the stop where the ride ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ride {
    legs: Vec<Leg>,
    destination: Box<str>,
}

impl Ride {
    pub fn new(legs: Vec<Leg>, destination: &str) -> Self {
        debug_assert!(!legs.is_empty(), "A ride needs at least one leg.");
        Self { legs, destination: destination.into() }
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    // Pairs each leg with the stop where it ends.
    fn legs_with_alighting(&self) -> impl Iterator<Item = (&Leg, &str)> {
        let alighting = self.legs.iter().skip(1).map(|leg| &*leg.stop).chain(std::iter::once(self.destination()));
        self.legs.iter().zip(alighting)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RideError {
    #[error("The ride is impossible.")]
    Impossible,
    #[error("The rider would have to wait at {0}.")]
    WaitAt(Box<str>),
}

/// Departure and arrival times of a single leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passage {
    pub departure: ClockTime,
    pub arrival: ClockTime,
}

impl Passage {
    pub fn minutes(&self) -> Minutes {
        self.departure.minutes_until(self.arrival) as Minutes
    }
}

/// Looks up the times at which `route` serves `from` and `to`.
///
/// The passage may run backwards in time if `to` comes before `from` on the route.
pub fn find_passage(network: &Network, route: RouteId, from: &str, to: &str) -> Option<Passage> {
    if from == to {
        return None;
    }
    let route = network.get_route(route)?;
    let departure = route.time_at(from)?;
    let arrival = route.time_at(to)?;
    Some(Passage { departure, arrival })
}

/// Number of minutes of ticket validity needed to cover the whole ride.
///
/// Each leg has to depart exactly when the previous one arrives: a leg that
/// departs earlier cannot be caught, and one that departs later would leave
/// the rider waiting at the transfer stop.
pub fn ride_time(ride: &Ride, network: &Network) -> Result<Minutes, RideError> {
    let mut duration: Minutes = 0;
    let mut current_time: Option<ClockTime> = None;

    for (leg, alighting) in ride.legs_with_alighting() {
        let passage = find_passage(network, leg.route, &leg.stop, alighting).ok_or(RideError::Impossible)?;
        trace!("Leg {} -> {} on route {}: {} to {}.", leg.stop, alighting, leg.route, passage.departure, passage.arrival);

        if let Some(current_time) = current_time {
            if passage.departure < current_time {
                return Err(RideError::Impossible);
            }
            if passage.departure > current_time {
                return Err(RideError::WaitAt(leg.stop.clone()));
            }
        }

        if passage.arrival < passage.departure {
            return Err(RideError::Impossible);
        }
        duration += passage.minutes();
        current_time = Some(passage.arrival);
    }

    Ok(duration + RIDE_TIME_ADJUSTMENT)
}
