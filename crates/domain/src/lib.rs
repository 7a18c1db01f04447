pub mod types;

pub use types::{
    AmountError, Holdings, Pair, Percent, Price, Quote, Token, TokenAmount, TokenBalance,
};
