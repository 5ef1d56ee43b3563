// Descriptor wallet library extending bitcoin & miniscript functionality
// by LNP/BP Association (https://lnp-bp.org)
// Written in 2020-2022 by
//     Dr. Maxim Orlovsky <orlovsky@pandoracore.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the Apache-2.0 License
// along with this software.
// If not, see <https://opensource.org/licenses/Apache-2.0>.

//! Typed transaction output destinations.
//!
//! A destination is a digest identifying who can spend a transaction output:
//! a hash of a public key ([`PubkeyHashDestination`],
//! [`WitnessPubkeyHashDestination`]) or of a script
//! ([`ScriptHashDestination`], [`WitnessScriptHashDestination`]).
//! Destinations generate the `scriptPubkey` paying to them and, for script
//! hashes, recognize the redeem script revealed by a spending input
//! ([`RedeemMatch`]).

// Coding conventions
#![recursion_limit = "256"]
#![deny(dead_code, missing_docs)]

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

#[macro_use]
mod destination;
pub mod address;
mod coin;
mod error;
mod keyhash;
mod redeem;
mod scripthash;
mod types;

pub use address::{AddressFormat, AddressNetwork, AddressParseError, DestinationAddress};
pub use coin::{Coin, Redeem, ScriptCoin};
pub use destination::{Destination, DestinationKind, DestinationParseError};
pub use error::DestinationError;
pub use keyhash::{PubkeyHashDestination, WitnessPubkeyHashDestination};
pub use redeem::RedeemMatch;
pub use scripthash::{ScriptHashDestination, WitnessScriptHashDestination};
pub use types::{PubkeyScript, RedeemScript, SigScript, WitnessScript};
