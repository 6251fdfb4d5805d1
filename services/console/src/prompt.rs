use std::io::{self, BufRead, Write};

use chrono::{Months, NaiveDate};
use property_manager::import::parse_date;
use property_manager::registry::{PropertyType, Rent};

const MINIMUM_TENANT_AGE_YEARS: u32 = 18;

/// Line-oriented console over any reader/writer pair so menus can run against scripts.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today
    }

    pub(crate) fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, or `None` once input is exhausted.
    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-asks until `validate` accepts the answer.
    pub(crate) fn prompt<T, F>(&mut self, label: &str, validate: F) -> io::Result<Option<T>>
    where
        F: Fn(&str, NaiveDate) -> Result<T, String>,
    {
        loop {
            write!(self.output, "{label}")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match validate(&answer, self.today) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => self.error(&message)?,
            }
        }
    }

    /// Reads a menu choice in `min..=max`.
    pub(crate) fn choose(&mut self, min: u32, max: u32) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(choice) if (min..=max).contains(&choice) => return Ok(Some(choice)),
                _ => {
                    self.error(&format!("Please enter a number between {min} and {max}."))?;
                    write!(self.output, "Try again: ")?;
                    self.output.flush()?;
                }
            }
        }
    }

    pub(crate) fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n{message}")
    }

    pub(crate) fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\nError: {message}")
    }
}

pub(crate) fn required(raw: &str, _today: NaiveDate) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("A value is required.".to_string());
    }
    Ok(raw.trim().to_string())
}

pub(crate) fn monthly_rent(raw: &str, _today: NaiveDate) -> Result<Rent, String> {
    match raw.parse::<Rent>() {
        Ok(rent) if !rent.is_zero() => Ok(rent),
        _ => Err("Enter a rent amount greater than zero, e.g. 1450.00.".to_string()),
    }
}

pub(crate) fn positive_count(raw: &str, _today: NaiveDate) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err("Enter a whole number greater than zero.".to_string()),
    }
}

pub(crate) fn property_type(raw: &str, _today: NaiveDate) -> Result<PropertyType, String> {
    raw.parse::<PropertyType>().map_err(|err| err.to_string())
}

pub(crate) fn email(raw: &str, _today: NaiveDate) -> Result<String, String> {
    let raw = raw.trim();
    if raw.contains('@') && raw.contains('.') && raw.chars().count() > 5 {
        Ok(raw.to_string())
    } else {
        Err("Enter a valid email address.".to_string())
    }
}

pub(crate) fn phone(raw: &str, _today: NaiveDate) -> Result<String, String> {
    let raw = raw.trim();
    let allowed = |c: char| c.is_ascii_digit() || " ()-+".contains(c);
    if !raw.is_empty() && raw.chars().any(|c| c.is_ascii_digit()) && raw.chars().all(allowed) {
        Ok(raw.to_string())
    } else {
        Err("Phone numbers may only contain digits, spaces and ()-+.".to_string())
    }
}

pub(crate) fn date_of_birth(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date = parse_date(raw)
        .ok_or_else(|| "Enter the date as MM/DD/YYYY or YYYY-MM-DD.".to_string())?;
    let cutoff = today
        .checked_sub_months(Months::new(MINIMUM_TENANT_AGE_YEARS * 12))
        .ok_or_else(|| "Date is out of range.".to_string())?;
    if date > cutoff {
        return Err(format!(
            "Tenants must be at least {MINIMUM_TENANT_AGE_YEARS} years old."
        ));
    }
    Ok(date)
}
