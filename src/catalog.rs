// src/catalog.rs
// Static catalog of supported city/airport pairs.

use once_cell::sync::Lazy;

use crate::model::Airport;

static AIRPORTS: Lazy<Vec<Airport>> = Lazy::new(|| {
    vec![
        Airport::new("Argentina", "Neuquen", "NQN", "Presidente Peron International Airport"),
        Airport::new("Argentina", "Buenos Aires", "EZE", "Ministro Pistarini International Airport (Ezeiza)"),
        Airport::new("Argentina", "Buenos Aires", "AEP", "Aeroparque Jorge Newbery"),
        Airport::new("Argentina", "Cordoba", "COR", "Ingeniero Ambrosio Taravella International Airport"),
        Airport::new("Argentina", "Mendoza", "MDZ", "El Plumerillo International Airport"),
        Airport::new("Argentina", "Bariloche", "BRC", "Teniente Luis Candelaria International Airport"),
        Airport::new("Argentina", "Salta", "SLA", "Martin Miguel de Guemes International Airport"),
        Airport::new("Brazil", "Sao Paulo", "GRU", "Guarulhos International Airport"),
        Airport::new("Brazil", "Sao Paulo", "CGH", "Congonhas Airport"),
        Airport::new("Brazil", "Rio de Janeiro", "GIG", "Galeao International Airport"),
        Airport::new("Brazil", "Rio de Janeiro", "SDU", "Santos Dumont Airport"),
        Airport::new("Chile", "Santiago", "SCL", "Arturo Merino Benitez International Airport"),
        Airport::new("Uruguay", "Montevideo", "MVD", "Carrasco International Airport"),
        Airport::new("Paraguay", "Asuncion", "ASU", "Silvio Pettirossi International Airport"),
        Airport::new("Peru", "Lima", "LIM", "Jorge Chavez International Airport"),
        Airport::new("United States", "New York", "JFK", "John F. Kennedy International Airport"),
        Airport::new("United States", "New York", "LGA", "LaGuardia Airport"),
        Airport::new("United States", "Miami", "MIA", "Miami International Airport"),
        Airport::new("United States", "Los Angeles", "LAX", "Los Angeles International Airport"),
        Airport::new("United States", "Orlando", "MCO", "Orlando International Airport"),
        Airport::new("Spain", "Madrid", "MAD", "Adolfo Suarez Madrid-Barajas Airport"),
        Airport::new("Spain", "Barcelona", "BCN", "Josep Tarradellas Barcelona-El Prat Airport"),
        Airport::new("Spain", "Seville", "SVQ", "Seville Airport"),
        Airport::new("Spain", "Valencia", "VLC", "Valencia Airport"),
        Airport::new("United Kingdom", "London", "LHR", "Heathrow Airport"),
        Airport::new("United Kingdom", "London", "LGW", "Gatwick Airport"),
        Airport::new("France", "Paris", "CDG", "Charles de Gaulle Airport"),
        Airport::new("France", "Paris", "ORY", "Paris-Orly Airport"),
        Airport::new("Italy", "Rome", "FCO", "Rome Fiumicino Airport"),
        Airport::new("Italy", "Milan", "MXP", "Milan Malpensa Airport"),
        Airport::new("Germany", "Berlin", "BER", "Berlin Brandenburg Airport"),
        Airport::new("Germany", "Frankfurt", "FRA", "Frankfurt am Main Airport"),
        Airport::new("Netherlands", "Amsterdam", "AMS", "Amsterdam Airport Schiphol"),
        Airport::new("Turkey", "Istanbul", "IST", "Istanbul Airport"),
        Airport::new("United Arab Emirates", "Dubai", "DXB", "Dubai International Airport"),
        Airport::new("Qatar", "Doha", "DOH", "Hamad International Airport"),
        Airport::new("Australia", "Sydney", "SYD", "Sydney Kingsford Smith Airport"),
        Airport::new("Japan", "Tokyo", "HND", "Haneda Airport"),
        Airport::new("Japan", "Tokyo", "NRT", "Narita International Airport"),
        Airport::new("China", "Beijing", "PEK", "Beijing Capital International Airport"),
        Airport::new("China", "Shanghai", "PVG", "Shanghai Pudong International Airport"),
        Airport::new("Mexico", "Mexico City", "MEX", "Benito Juarez International Airport"),
        Airport::new("Colombia", "Bogota", "BOG", "El Dorado International Airport"),
        Airport::new("Panama", "Panama City", "PTY", "Tocumen International Airport"),
        Airport::new("Costa Rica", "San Jose", "SJO", "Juan Santamaria International Airport"),
        Airport::new("Canada", "Toronto", "YYZ", "Toronto Pearson International Airport"),
        Airport::new("Canada", "Vancouver", "YVR", "Vancouver International Airport"),
        Airport::new("South Africa", "Cape Town", "CPT", "Cape Town International Airport"),
        Airport::new("Egypt", "Cairo", "CAI", "Cairo International Airport"),
        Airport::new("Thailand", "Bangkok", "BKK", "Suvarnabhumi Airport"),
        Airport::new("Singapore", "Singapore", "SIN", "Singapore Changi Airport"),
        Airport::new("New Zealand", "Auckland", "AKL", "Auckland Airport"),
        Airport::new("Portugal", "Lisbon", "LIS", "Humberto Delgado Airport"),
        Airport::new("Portugal", "Porto", "OPO", "Francisco Sa Carneiro Airport"),
        Airport::new("Greece", "Athens", "ATH", "Athens Eleftherios Venizelos International Airport"),
        Airport::new("Switzerland", "Zurich", "ZRH", "Zurich Airport"),
        Airport::new("Switzerland", "Geneva", "GVA", "Geneva Airport"),
        Airport::new("United Arab Emirates", "Abu Dhabi", "AUH", "Abu Dhabi International Airport"),
        Airport::new("India", "Delhi", "DEL", "Indira Gandhi International Airport"),
        Airport::new("India", "Mumbai", "BOM", "Chhatrapati Shivaji Maharaj International Airport"),
        Airport::new("South Korea", "Seoul", "ICN", "Incheon International Airport"),
        Airport::new("United States", "San Francisco", "SFO", "San Francisco International Airport"),
        Airport::new("United States", "Chicago", "ORD", "O'Hare International Airport"),
        Airport::new("United States", "Dallas", "DFW", "Dallas/Fort Worth International Airport"),
        Airport::new("United States", "Atlanta", "ATL", "Hartsfield-Jackson Atlanta International Airport"),
    ]
});

pub fn airports() -> &'static [Airport] {
    &AIRPORTS
}

/// All airports serving a city, case-insensitive.
pub fn find_by_city(city: &str) -> Vec<&'static Airport> {
    AIRPORTS
        .iter()
        .filter(|a| a.city.eq_ignore_ascii_case(city.trim()))
        .collect()
}

/// Lookup by IATA code, case-insensitive.
pub fn find_by_code(code: &str) -> Option<&'static Airport> {
    AIRPORTS
        .iter()
        .find(|a| a.code.eq_ignore_ascii_case(code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_lookup_is_case_insensitive() {
        let hits = find_by_city("buenos aires");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|a| a.code == "EZE"));
        assert!(hits.iter().any(|a| a.code == "AEP"));
    }

    #[test]
    fn code_lookup_is_case_insensitive() {
        assert_eq!(find_by_code("mad").unwrap().city, "Madrid");
        assert!(find_by_code("XXX").is_none());
    }

    #[test]
    fn unknown_city_yields_empty() {
        assert!(find_by_city("Atlantis").is_empty());
    }
}
