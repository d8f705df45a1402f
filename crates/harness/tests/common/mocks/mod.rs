/// Single-cycle RV32 subset SoC.
pub mod soc;
