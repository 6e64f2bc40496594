//! Instruction names for signed API operations
//!
//! Every authenticated request is bound to an instruction: the wire name is
//! part of the signed payload, so a signature for one operation cannot be
//! replayed against another.

/// API operation category, as named by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    BalanceQuery,
    DepositAddressQuery,
    DepositQueryAll,
    FillHistoryQueryAll,
    OrderCancel,
    OrderCancelAll,
    OrderExecute,
    OrderHistoryQueryAll,
    OrderQuery,
    OrderQueryAll,
    Withdraw,
    WithdrawalQueryAll,
}

impl Instruction {
    /// The name used on the wire and in the signing payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Instruction::BalanceQuery => "balanceQuery",
            Instruction::DepositAddressQuery => "depositAddressQuery",
            Instruction::DepositQueryAll => "depositQueryAll",
            Instruction::FillHistoryQueryAll => "fillHistoryQueryAll",
            Instruction::OrderCancel => "orderCancel",
            Instruction::OrderCancelAll => "orderCancelAll",
            Instruction::OrderExecute => "orderExecute",
            Instruction::OrderHistoryQueryAll => "orderHistoryQueryAll",
            Instruction::OrderQuery => "orderQuery",
            Instruction::OrderQueryAll => "orderQueryAll",
            Instruction::Withdraw => "withdraw",
            Instruction::WithdrawalQueryAll => "withdrawalQueryAll",
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(Instruction::OrderExecute.as_str(), "orderExecute");
        assert_eq!(Instruction::OrderQuery.as_str(), "orderQuery");
        assert_eq!(Instruction::OrderCancelAll.as_str(), "orderCancelAll");
        assert_eq!(Instruction::BalanceQuery.as_str(), "balanceQuery");
        assert_eq!(Instruction::OrderExecute.to_string(), "orderExecute");
    }
}
