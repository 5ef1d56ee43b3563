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

use std::fmt::Display;

use bitcoin::TxIn;

use crate::{Coin, DestinationError, DestinationKind, ScriptCoin};

/// Redeem script matching for destinations committing to a script hash.
///
/// Implemented only by [`crate::ScriptHashDestination`] and
/// [`crate::WitnessScriptHashDestination`].
pub trait RedeemMatch: Display {
    /// Type of the script revealed on spending
    type Redeem: Clone + Display;

    /// Kind of the implementing destination
    const KIND: DestinationKind;

    /// Extracts candidate redeem script from the transaction input spending
    /// the destination. The extraction is structural; the returned script is
    /// not checked against the destination digest.
    fn extract_redeem_script(&self, txin: &TxIn) -> Option<Self::Redeem>;

    /// Checks whether the destination digest commits to the script.
    fn is_committed_to(&self, redeem: &Self::Redeem) -> bool;

    /// Attaches verified redeem script to the coin.
    fn attach_redeem(coin: &Coin, redeem: Self::Redeem) -> ScriptCoin;

    /// Produces [`ScriptCoin`] if `redeem` hashes to the destination digest.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the script does not match the destination; this is a
    /// normal outcome when an input is tested against several candidate
    /// destinations.
    ///
    /// # Errors
    ///
    /// [`DestinationError::MissingArgument`] if the coin or the redeem script
    /// is not provided.
    fn to_script_coin(
        &self,
        coin: Option<&Coin>,
        redeem: Option<&Self::Redeem>,
    ) -> Result<Option<ScriptCoin>, DestinationError> {
        let coin = coin.ok_or(DestinationError::MissingArgument("coin"))?;
        let redeem = redeem.ok_or(DestinationError::MissingArgument("redeem"))?;
        if !self.is_committed_to(redeem) {
            log::debug!(
                "script {} does not match {} destination {}",
                redeem,
                Self::KIND,
                self
            );
            return Ok(None);
        }
        log::trace!("coin {} spendable with {} script {}", coin.outpoint, Self::KIND, redeem);
        Ok(Some(Self::attach_redeem(coin, redeem.clone())))
    }

    /// Extracts redeem script from the input spending the coin and produces
    /// [`ScriptCoin`] if it matches the destination.
    fn match_input(&self, coin: &Coin, txin: &TxIn) -> Option<ScriptCoin> {
        let redeem = self.extract_redeem_script(txin)?;
        if self.is_committed_to(&redeem) {
            Some(Self::attach_redeem(coin, redeem))
        } else {
            log::debug!(
                "input {} does not spend {} destination {}",
                txin.previous_output,
                Self::KIND,
                self
            );
            None
        }
    }
}
