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

use bitcoin::hashes::hex;

use crate::DestinationKind;

/// Errors constructing destinations or matching them against spending data.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum DestinationError {
    /// {kind} destination requires {expected}-byte digest, while {actual} bytes
    /// were provided
    InvalidLength {
        /// Kind of the destination under construction
        kind: DestinationKind,
        /// Fixed digest size of the destination kind
        expected: usize,
        /// Number of bytes actually provided
        actual: usize,
    },

    /// invalid hexadecimal digest representation: {0}
    #[from]
    InvalidEncoding(hex::Error),

    /// required argument `{0}` is absent
    MissingArgument(&'static str),
}
