//! Call contracts of the venues the adapters target.
//!
//! Only the functions the adapters invoke or read are declared.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    #[sol(all_derives)]
    interface IWrappedNative {
        function deposit() external payable;
        function withdraw(uint256 amount) external;
    }

    #[sol(all_derives)]
    interface IUniswapV2Pair {
        function factory() external view returns (address);
        function token0() external view returns (address);
        function token1() external view returns (address);
    }

    #[sol(all_derives)]
    interface IUniswapV2Router {
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts);
    }

    #[sol(all_derives)]
    interface IUniswapV3Pool {
        function factory() external view returns (address);
        function token0() external view returns (address);
        function token1() external view returns (address);
        function fee() external view returns (uint24);
    }

    #[sol(all_derives)]
    interface IUniswapV3Router {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
    }

    #[sol(all_derives)]
    interface IBalancerPool {
        function getPoolId() external view returns (bytes32);
    }

    #[sol(all_derives)]
    interface IBalancerVault {
        enum SwapKind { GIVEN_IN, GIVEN_OUT }

        struct SingleSwap {
            bytes32 poolId;
            SwapKind kind;
            address assetIn;
            address assetOut;
            uint256 amount;
            bytes userData;
        }

        struct FundManagement {
            address sender;
            bool fromInternalBalance;
            address recipient;
            bool toInternalBalance;
        }

        struct JoinPoolRequest {
            address[] assets;
            uint256[] maxAmountsIn;
            bytes userData;
            bool fromInternalBalance;
        }

        struct ExitPoolRequest {
            address[] assets;
            uint256[] minAmountsOut;
            bytes userData;
            bool toInternalBalance;
        }

        function getPoolTokens(bytes32 poolId) external view returns (address[] tokens, uint256[] balances, uint256 lastChangeBlock);
        function swap(SingleSwap singleSwap, FundManagement funds, uint256 limit, uint256 deadline) external payable returns (uint256);
        function joinPool(bytes32 poolId, address sender, address recipient, JoinPoolRequest request) external payable;
        function exitPool(bytes32 poolId, address sender, address recipient, ExitPoolRequest request) external;
    }

    /// Stable-swap style pools indexed with `int128`.
    #[sol(all_derives)]
    interface ICurvePool {
        function coins(uint256 i) external view returns (address);
        function exchange(int128 i, int128 j, uint256 dx, uint256 min_dy) external payable returns (uint256);
        function exchange_underlying(int128 i, int128 j, uint256 dx, uint256 min_dy) external returns (uint256);
        function remove_liquidity_one_coin(uint256 token_amount, int128 i, uint256 min_amount) external returns (uint256);
    }

    /// Crypto-swap style pools indexed with `uint256`.
    #[sol(all_derives)]
    interface ICurveCryptoPool {
        function exchange(uint256 i, uint256 j, uint256 dx, uint256 min_dy) external payable returns (uint256);
        function remove_liquidity_one_coin(uint256 token_amount, uint256 i, uint256 min_amount) external returns (uint256);
    }

    #[sol(all_derives)]
    interface ICurvePool2 {
        function add_liquidity(uint256[2] amounts, uint256 min_mint_amount) external payable;
    }

    #[sol(all_derives)]
    interface ICurvePool3 {
        function add_liquidity(uint256[3] amounts, uint256 min_mint_amount) external payable;
    }

    #[sol(all_derives)]
    interface ICurvePool4 {
        function add_liquidity(uint256[4] amounts, uint256 min_mint_amount) external payable;
    }

    /// Deposit zap shared by the factory meta pools of one base pool.
    #[sol(all_derives)]
    interface ICurveMetaZap {
        function remove_liquidity_one_coin(address pool, uint256 burn_amount, int128 i, uint256 min_amount) external returns (uint256);
    }

    #[sol(all_derives)]
    interface ICurveMetaZap3 {
        function add_liquidity(address pool, uint256[3] deposit_amounts, uint256 min_mint_amount) external returns (uint256);
    }

    #[sol(all_derives)]
    interface ICurveMetaZap4 {
        function add_liquidity(address pool, uint256[4] deposit_amounts, uint256 min_mint_amount) external returns (uint256);
    }

    #[sol(all_derives)]
    interface ILiquidStake {
        function submit(address referral) external payable returns (uint256);
    }

    #[sol(all_derives)]
    interface IWrappedLiquidStake {
        function stETH() external view returns (address);
        function wrap(uint256 amount) external returns (uint256);
        function unwrap(uint256 amount) external returns (uint256);
    }
}
