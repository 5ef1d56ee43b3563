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

use std::fmt::{self, Display, Formatter};

use bitcoin::{OutPoint, TxOut};

use crate::{Destination, PubkeyScript, RedeemScript, WitnessScript};

/// Unspent transaction output together with its outpoint.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Coin {
    /// Outpoint of the coin
    pub outpoint: OutPoint,

    /// Output spent by the coin
    pub txout: TxOut,
}

impl Coin {
    /// Constructs coin from the outpoint and its output
    #[inline]
    pub fn new(outpoint: OutPoint, txout: TxOut) -> Self { Coin { outpoint, txout } }

    /// Amount of the coin, in satoshis
    #[inline]
    pub fn amount(&self) -> u64 { self.txout.value }

    /// `scriptPubkey` of the coin output
    #[inline]
    pub fn script_pubkey(&self) -> PubkeyScript { self.txout.script_pubkey.clone().into() }

    /// Destination paid by the coin output, if the output uses one of the
    /// known templates
    #[inline]
    pub fn destination(&self) -> Option<Destination> { self.script_pubkey().destination() }

    /// Attaches P2SH redeem script to the coin
    pub fn with_script_redeem(&self, redeem_script: RedeemScript) -> ScriptCoin {
        ScriptCoin {
            coin: self.clone(),
            redeem: Redeem::Legacy(redeem_script),
        }
    }

    /// Attaches P2WSH witness script to the coin
    pub fn with_witness_redeem(&self, witness_script: WitnessScript) -> ScriptCoin {
        ScriptCoin {
            coin: self.clone(),
            redeem: Redeem::Witness(witness_script),
        }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} sat", self.outpoint, self.txout.value)
    }
}

/// Script which has to be revealed for spending a script hash output
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub enum Redeem {
    /// `redeemScript` revealed in `scriptSig`
    #[display("redeem({0})")]
    Legacy(RedeemScript),

    /// `witnessScript` revealed as the last element of the witness stack
    #[display("witness({0})")]
    Witness(WitnessScript),
}

/// Coin whose redeem script is known and verified to match its destination
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[display("{coin} {redeem}")]
pub struct ScriptCoin {
    coin: Coin,
    redeem: Redeem,
}

impl ScriptCoin {
    /// Coin spent with the script
    #[inline]
    pub fn coin(&self) -> &Coin { &self.coin }

    /// Redeem script of the coin
    #[inline]
    pub fn redeem(&self) -> &Redeem { &self.redeem }

    /// Amount of the coin, in satoshis
    #[inline]
    pub fn amount(&self) -> u64 { self.coin.amount() }

    /// Detects whether the redeem script is revealed through the witness
    #[inline]
    pub fn is_witness(&self) -> bool { matches!(self.redeem, Redeem::Witness(_)) }

    /// Releases the coin and the redeem script
    #[inline]
    pub fn into_parts(self) -> (Coin, Redeem) { (self.coin, self.redeem) }
}
