use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PropertyId;

/// Dates requested for a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub property_id: PropertyId,
    pub start_date: Date,
    pub end_date: Date,
}

impl NewBooking {
    /// Number of nights, or `None` unless check-out is after check-in.
    pub fn nights(&self) -> Option<i64> {
        if self.end_date <= self.start_date {
            return None;
        }
        self.start_date
            .until(self.end_date)
            .ok()
            .map(|span| i64::from(span.get_days()))
    }

    /// Nights multiplied by the nightly rate. `None` for an empty stay or
    /// when the product does not fit in a `Decimal`.
    pub fn total_price(&self, price_per_night: Decimal) -> Option<Decimal> {
        self.nights()
            .and_then(|nights| Decimal::from(nights).checked_mul(price_per_night))
    }
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub booking: NewBooking,
}

/// Credentials for the development session endpoint.
#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use rust_decimal::dec;

    fn stay(start: Date, end: Date) -> NewBooking {
        NewBooking {
            property_id: PropertyId(1),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn nights_span_month_boundaries() {
        let booking = stay(date(2025, 1, 30), date(2025, 2, 2));
        assert_eq!(booking.nights(), Some(3));
        assert_eq!(booking.total_price(dec!(80)), Some(dec!(240)));
    }

    #[test]
    fn empty_or_inverted_ranges_have_no_nights() {
        assert_eq!(stay(date(2025, 3, 1), date(2025, 3, 1)).nights(), None);
        assert_eq!(stay(date(2025, 3, 2), date(2025, 3, 1)).nights(), None);
        assert_eq!(
            stay(date(2025, 3, 2), date(2025, 3, 1)).total_price(dec!(80)),
            None
        );
    }

    #[test]
    fn total_that_overflows_is_none() {
        let booking = stay(date(2025, 1, 1), date(2025, 1, 3));
        assert_eq!(booking.total_price(Decimal::MAX), None);
        assert_eq!(booking.total_price(dec!(0)), Some(dec!(0)));
    }
}
