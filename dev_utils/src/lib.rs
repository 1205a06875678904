use tramfare::network::{Minutes, Price, Ticket};
use tramfare::Processor;

// Common example data for the tests and benchmarks.

pub const EXAMPLE_ROUTES: &[&str] = &[
    "1 5:55 Dworzec 6:00 Rondo 6:07 Rynek 6:15 Uczelnia 6:30 Park",
    "2 6:07 Rynek 6:12 Teatr 6:20 Szpital",
    "3 6:20 Szpital 6:45 Osiedle_Poludnie 7:30 Zajezdnia",
    "4 6:15 Uczelnia 6:40 Osiedle_Poludnie",
    "17 21:00 Zajezdnia 21:21 Dworzec",
];

pub const EXAMPLE_TICKETS: &[&str] = &[
    "Jednorazowy 3.40 15",
    "Czterdziesci minut 4.40 40",
    "Dobowy 15.00 1000",
    "Krotki 2.00 5",
];

pub fn get_example_input() -> String {
    let mut input = String::new();
    for line in EXAMPLE_ROUTES.iter().chain(EXAMPLE_TICKETS) {
        input += line;
        input.push('\n');
    }
    input
}

/// A processor that has already read the example routes and tickets.
pub fn build_example_processor() -> Processor {
    let mut processor = Processor::new();
    let mut sink = std::io::sink();
    for line in EXAMPLE_ROUTES.iter().chain(EXAMPLE_TICKETS) {
        processor
            .process_line(line, &mut sink, &mut std::io::sink())
            .unwrap();
    }
    processor
}

pub fn get_example_queries() -> Vec<&'static str> {
    vec![
        "? Dworzec 1 Rynek",
        "? Dworzec 1 Rynek 2 Szpital 3 Zajezdnia",
        "? Dworzec 1 Uczelnia 4 Osiedle_Poludnie",
        "? Rynek 2 Szpital 3 Zajezdnia 17 Dworzec",
        "? Dworzec 1 Park",
    ]
}

/// A price list of `len` tickets with random prices and validity lengths up to `max_validity`.
pub fn get_random_tickets(seed: u64, len: usize, max_validity: Minutes) -> Vec<Ticket> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len)
        .map(|i| {
            let price = Price::from_cents(rng.u64(1..10_000));
            Ticket::new(&format!("Ticket {i}"), price, rng.u32(1..=max_validity))
        })
        .collect()
}
