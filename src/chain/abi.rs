//! Prediction market contract interface.
//!
//! `getLiquidity` and `marketCount` are not in the published ABI but the
//! reader depends on them; their signatures are assumed.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPredictionMarket {
        function createMarket(string question, uint256 endTime) external;

        function addLiquidity(uint256 marketId, bool position) external payable;

        function claimWinnings(uint256 marketId) external;

        function markets(uint256 id)
            external
            view
            returns (
                string question,
                uint256 endTime,
                uint256 totalLiquidity,
                bool resolved,
                bool outcome
            );

        function getLiquidity(uint256 marketId, bool position) external view returns (uint256);

        function marketCount() external view returns (uint256);
    }
}
