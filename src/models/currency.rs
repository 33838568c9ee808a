use rust_decimal::{Decimal, RoundingStrategy};

/// Display currency. Only changes how amounts are shown; stored values are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Jpy,
    Gbp,
    Aud,
    Cad,
    Chf,
    Cny,
    Sek,
    Nzd,
    Mxn,
    Sgd,
    Hkd,
    Nok,
    Krw,
    Try,
    Inr,
    Rub,
    Brl,
    Zar,
    Php,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Prefix,
    PrefixSpaced,
    SuffixSpaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    Thousands,
    /// Lakh/crore: last group of three, then groups of two.
    Indian,
}

/// Conventions of the currency's home locale.
#[derive(Debug)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    symbol: &'static str,
    placement: Placement,
    group: char,
    decimal: char,
    minor_digits: u32,
    grouping: Grouping,
}

const NBSP: char = '\u{a0}';

const fn info(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    placement: Placement,
    group: char,
    decimal: char,
    minor_digits: u32,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        name,
        symbol,
        placement,
        group,
        decimal,
        minor_digits,
        grouping: Grouping::Thousands,
    }
}

use Placement::{Prefix, PrefixSpaced, SuffixSpaced};

static USD: CurrencyInfo = info("USD", "US Dollar", "$", Prefix, ',', '.', 2);
static EUR: CurrencyInfo = info("EUR", "Euro", "€", SuffixSpaced, '.', ',', 2);
static JPY: CurrencyInfo = info("JPY", "Japanese Yen", "¥", Prefix, ',', '.', 0);
static GBP: CurrencyInfo = info("GBP", "British Pound", "£", Prefix, ',', '.', 2);
static AUD: CurrencyInfo = info("AUD", "Australian Dollar", "$", Prefix, ',', '.', 2);
static CAD: CurrencyInfo = info("CAD", "Canadian Dollar", "$", Prefix, ',', '.', 2);
static CHF: CurrencyInfo = info("CHF", "Swiss Franc", "CHF", PrefixSpaced, '\u{2019}', '.', 2);
static CNY: CurrencyInfo = info("CNY", "Chinese Yuan", "¥", Prefix, ',', '.', 2);
static SEK: CurrencyInfo = info("SEK", "Swedish Krona", "kr", SuffixSpaced, NBSP, ',', 2);
static NZD: CurrencyInfo = info("NZD", "New Zealand Dollar", "$", Prefix, ',', '.', 2);
static MXN: CurrencyInfo = info("MXN", "Mexican Peso", "$", Prefix, ',', '.', 2);
static SGD: CurrencyInfo = info("SGD", "Singapore Dollar", "$", Prefix, ',', '.', 2);
static HKD: CurrencyInfo = info("HKD", "Hong Kong Dollar", "HK$", Prefix, ',', '.', 2);
static NOK: CurrencyInfo = info("NOK", "Norwegian Krone", "kr", PrefixSpaced, NBSP, ',', 2);
static KRW: CurrencyInfo = info("KRW", "South Korean Won", "₩", Prefix, ',', '.', 0);
static TRY: CurrencyInfo = info("TRY", "Turkish Lira", "₺", Prefix, '.', ',', 2);
static INR: CurrencyInfo = CurrencyInfo {
    grouping: Grouping::Indian,
    ..info("INR", "Indian Rupee", "₹", Prefix, ',', '.', 2)
};
static RUB: CurrencyInfo = info("RUB", "Russian Ruble", "₽", SuffixSpaced, NBSP, ',', 2);
static BRL: CurrencyInfo = info("BRL", "Brazilian Real", "R$", PrefixSpaced, '.', ',', 2);
static ZAR: CurrencyInfo = info("ZAR", "South African Rand", "R", PrefixSpaced, NBSP, ',', 2);
static PHP: CurrencyInfo = info("PHP", "Philippine Peso", "₱", Prefix, ',', '.', 2);

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[
            Self::Usd,
            Self::Eur,
            Self::Jpy,
            Self::Gbp,
            Self::Aud,
            Self::Cad,
            Self::Chf,
            Self::Cny,
            Self::Sek,
            Self::Nzd,
            Self::Mxn,
            Self::Sgd,
            Self::Hkd,
            Self::Nok,
            Self::Krw,
            Self::Try,
            Self::Inr,
            Self::Rub,
            Self::Brl,
            Self::Zar,
            Self::Php,
        ]
    }

    /// Shown first in the picker.
    pub fn top() -> &'static [Currency] {
        &[
            Self::Usd,
            Self::Eur,
            Self::Jpy,
            Self::Gbp,
            Self::Aud,
            Self::Php,
        ]
    }

    pub fn is_top(&self) -> bool {
        Self::top().contains(self)
    }

    pub fn info(&self) -> &'static CurrencyInfo {
        match self {
            Self::Usd => &USD,
            Self::Eur => &EUR,
            Self::Jpy => &JPY,
            Self::Gbp => &GBP,
            Self::Aud => &AUD,
            Self::Cad => &CAD,
            Self::Chf => &CHF,
            Self::Cny => &CNY,
            Self::Sek => &SEK,
            Self::Nzd => &NZD,
            Self::Mxn => &MXN,
            Self::Sgd => &SGD,
            Self::Hkd => &HKD,
            Self::Nok => &NOK,
            Self::Krw => &KRW,
            Self::Try => &TRY,
            Self::Inr => &INR,
            Self::Rub => &RUB,
            Self::Brl => &BRL,
            Self::Zar => &ZAR,
            Self::Php => &PHP,
        }
    }

    pub fn code(&self) -> &'static str {
        self.info().code
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Lookup by ISO code, case-insensitive.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Picker contents for a search query: matching top currencies first, then the
    /// remaining matches. Each currency appears once.
    pub fn search(query: &str) -> Vec<Currency> {
        let query = query.trim().to_lowercase();
        let matches = |c: &&Currency| {
            query.is_empty()
                || c.code().to_lowercase().contains(&query)
                || c.name().to_lowercase().contains(&query)
        };
        Self::top()
            .iter()
            .filter(matches)
            .chain(Self::all().iter().filter(|c| !c.is_top()).filter(matches))
            .copied()
            .collect()
    }

    /// Format an amount for display, e.g. `1234.5` → `"$1,234.50"` or `"1.234,50 €"`.
    pub fn format(&self, amount: Decimal) -> String {
        let info = self.info();
        let rounded = amount
            .abs()
            .round_dp_with_strategy(info.minor_digits, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{rounded:.prec$}", prec = info.minor_digits as usize);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut number = group_digits(int_part, info.group, info.grouping);
        if let Some(frac) = frac_part {
            number.push(info.decimal);
            number.push_str(frac);
        }

        let body = match info.placement {
            Placement::Prefix => format!("{}{number}", info.symbol),
            Placement::PrefixSpaced => format!("{}{NBSP}{number}", info.symbol),
            Placement::SuffixSpaced => format!("{number}{NBSP}{}", info.symbol),
        };

        if amount.is_sign_negative() && !rounded.is_zero() {
            format!("-{body}")
        } else {
            body
        }
    }
}

fn group_digits(int_part: &str, sep: char, grouping: Grouping) -> String {
    let rest = match grouping {
        Grouping::Thousands => 3,
        Grouping::Indian => 2,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = int_part.len();
    let mut size = 3;
    while end > size {
        groups.push(&int_part[end - size..end]);
        end -= size;
        size = rest;
    }
    groups.push(&int_part[..end]);
    groups.reverse();

    let mut out = String::with_capacity(int_part.len() + groups.len());
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(group);
    }
    out
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
