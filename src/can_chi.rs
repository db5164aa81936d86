//! Heavenly Stems and Earthly Branches (Can Chi) of lunar years.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Heavenly Stem (Thiên Can).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Can {
    #[display(fmt = "Giáp")]
    Giap,
    #[display(fmt = "Ất")]
    At,
    #[display(fmt = "Bính")]
    Binh,
    #[display(fmt = "Đinh")]
    Dinh,
    #[display(fmt = "Mậu")]
    Mau,
    #[display(fmt = "Kỷ")]
    Ky,
    #[display(fmt = "Canh")]
    Canh,
    #[display(fmt = "Tân")]
    Tan,
    #[display(fmt = "Nhâm")]
    Nham,
    #[display(fmt = "Quý")]
    Quy,
}

impl Can {
    pub const ALL: [Self; 10] = [
        Self::Giap,
        Self::At,
        Self::Binh,
        Self::Dinh,
        Self::Mau,
        Self::Ky,
        Self::Canh,
        Self::Tan,
        Self::Nham,
        Self::Quy,
    ];

    /// Stem of a lunar year: `(year + 6) mod 10`.
    pub const fn from_year(year: i32) -> Self {
        Self::ALL[(year as i64 + 6).rem_euclid(10) as usize]
    }
}

/// Earthly Branch (Địa Chi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Chi {
    #[display(fmt = "Tý")]
    Ty,
    #[display(fmt = "Sửu")]
    Suu,
    #[display(fmt = "Dần")]
    Dan,
    #[display(fmt = "Mão")]
    Mao,
    #[display(fmt = "Thìn")]
    Thin,
    #[display(fmt = "Tỵ")]
    Ti,
    #[display(fmt = "Ngọ")]
    Ngo,
    #[display(fmt = "Mùi")]
    Mui,
    #[display(fmt = "Thân")]
    Than,
    #[display(fmt = "Dậu")]
    Dau,
    #[display(fmt = "Tuất")]
    Tuat,
    #[display(fmt = "Hợi")]
    Hoi,
}

impl Chi {
    pub const ALL: [Self; 12] = [
        Self::Ty,
        Self::Suu,
        Self::Dan,
        Self::Mao,
        Self::Thin,
        Self::Ti,
        Self::Ngo,
        Self::Mui,
        Self::Than,
        Self::Dau,
        Self::Tuat,
        Self::Hoi,
    ];

    /// Branch of a lunar year: `(year + 8) mod 12`.
    pub const fn from_year(year: i32) -> Self {
        Self::ALL[(year as i64 + 8).rem_euclid(12) as usize]
    }
}

/// Name of a lunar year in the sixty-year cycle, e.g. `Giáp Thìn` for 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{can} {chi}")]
pub struct CanChi {
    pub can: Can,
    pub chi: Chi,
}

impl CanChi {
    pub const fn from_year(year: i32) -> Self {
        Self {
            can: Can::from_year(year),
            chi: Chi::from_year(year),
        }
    }
}
