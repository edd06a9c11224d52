/// Prices display in pesos, whole amounts without the decimals.
pub fn peso(value: &f64) -> ::askama::Result<String> {
    if value.fract() == 0.0 {
        Ok(format!("₱{}", *value as i64))
    } else {
        Ok(format!("₱{value:.2}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_drop_the_decimals() {
        assert_eq!(peso(&150.0).unwrap(), "₱150");
    }

    #[test]
    fn fractional_amounts_keep_two_places() {
        assert_eq!(peso(&149.5).unwrap(), "₱149.50");
    }
}
