//! User-facing flight listings.

use crate::types::FlightRecord;

/// Format a single flight as a readable block.
pub fn format_flight(flight: &FlightRecord) -> String {
    let mut layover_line = String::new();
    if !flight.layovers.is_empty() {
        let overnight = if flight.overnight_layover {
            " (overnight)"
        } else {
            ""
        };
        layover_line = format!(
            "\n  Layovers: {}{}",
            flight.layovers.join(", "),
            overnight
        );
    }

    let dates = match flight.return_date {
        Some(return_date) => format!("{} to {}", flight.departure_date, return_date),
        None => format!("{} (one-way)", flight.departure_date),
    };

    let refundable = if flight.refundable { "Yes" } else { "No" };

    format!(
        "Flight {}:\n  Airline: {} ({})\n  Route: {} -> {}{}\n  Dates: {}\n  Price: ${:.0} USD\n  Refundable: {}\n",
        flight.id,
        flight.airline,
        flight.alliance,
        flight.from,
        flight.to,
        layover_line,
        dates,
        flight.price_usd,
        refundable
    )
}

/// Format a result list, capped at `max_results` entries.
pub fn format_flight_list(flights: &[FlightRecord], max_results: usize) -> String {
    if flights.is_empty() {
        return "No flights found matching your criteria.".to_string();
    }

    let mut output = format!("Found {} flight(s):\n", flights.len());
    output.push_str(&"=".repeat(50));
    output.push('\n');

    for flight in flights.iter().take(max_results) {
        output.push_str(&format_flight(flight));
        output.push_str(&"-".repeat(50));
        output.push('\n');
    }

    if flights.len() > max_results {
        output.push_str(&format!(
            "\n(Showing top {} of {} results)",
            max_results,
            flights.len()
        ));
    }

    output
}
