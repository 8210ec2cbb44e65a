//! Definitions of Solidity functions called after deployment

// The `abigen!` macro generates contract bindings without doc comments, so the
// crate-level `deny(missing_docs)` lints do not apply to this module.
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use ethers::contract::abigen;

abigen!(
    Erc20Contract,
    r#"[
        function totalSupply() external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
        function transfer(address to, uint256 value) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
        function approve(address spender, uint256 value) external returns (bool)
        function transferFrom(address from, address to, uint256 value) external returns (bool)
    ]"#
);

abigen!(
    FactoryContract,
    r#"[
        function getPair(address tokenA, address tokenB) external view returns (address pair)
        function allPairsLength() external view returns (uint)
        function feeToSetter() external view returns (address)
        function createPair(address tokenA, address tokenB) external returns (address pair)
    ]"#,
);

abigen!(
    RouterContract,
    r#"[
        function factory() external pure returns (address)
        function WETH() external pure returns (address)
        function addLiquidity(address tokenA, address tokenB, uint amountADesired, uint amountBDesired, uint amountAMin, uint amountBMin, address to, uint deadline) external returns (uint amountA, uint amountB, uint liquidity)
    ]"#,
);

abigen!(
    PairContract,
    r#"[
        function token0() external view returns (address)
        function token1() external view returns (address)
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast)
    ]"#,
);
