//! In-memory chain and venues for tests.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use std::collections::HashMap;

use crate::math::common::mul_div_floor;
use crate::venue::abi::{
    ICurveCryptoPool, ICurvePool, ICurvePool2, ICurvePool3, ICurvePool4, IERC20,
    ILiquidStake, IUniswapV2Router, IWrappedLiquidStake, IWrappedNative,
};
use crate::venue::common::{Chain, ShareAssets, SnapshotId, VenueCall, is_native};

pub(crate) fn revert(reason: &str) -> Bytes {
    Bytes::copy_from_slice(reason.as_bytes())
}

fn selector(data: &[u8]) -> [u8; 4] {
    let mut selector = [0u8; 4];
    if data.len() >= 4 {
        selector.copy_from_slice(&data[..4]);
    }
    selector
}

fn decode<C: SolCall>(data: &[u8]) -> Result<C, Bytes> {
    C::abi_decode(data).map_err(|_| revert("bad calldata"))
}

/// Token and native balances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Ledger {
    native: HashMap<Address, U256>,
    tokens: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
}

impl Ledger {
    pub fn balance(&self, asset: Address, holder: Address) -> U256 {
        self.tokens.get(&(asset, holder)).copied().unwrap_or_default()
    }

    pub fn native(&self, holder: Address) -> U256 {
        self.native.get(&holder).copied().unwrap_or_default()
    }

    pub fn mint(&mut self, asset: Address, holder: Address, amount: U256) {
        *self.tokens.entry((asset, holder)).or_default() += amount;
    }

    pub fn fund_native(&mut self, holder: Address, amount: U256) {
        *self.native.entry(holder).or_default() += amount;
    }

    pub fn burn(&mut self, asset: Address, holder: Address, amount: U256) -> Result<(), Bytes> {
        let balance = self.tokens.entry((asset, holder)).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or_else(|| revert("burn exceeds balance"))?;
        Ok(())
    }

    pub fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Bytes> {
        self.burn(asset, from, amount)
            .map_err(|_| revert("transfer exceeds balance"))?;
        self.mint(asset, to, amount);
        Ok(())
    }

    pub fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> Result<(), Bytes> {
        let balance = self.native.entry(from).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or_else(|| revert("insufficient native balance"))?;
        self.fund_native(to, amount);
        Ok(())
    }

    pub fn approve(&mut self, asset: Address, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    pub fn transfer_from(
        &mut self,
        asset: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), Bytes> {
        let allowance = self.allowances.entry((asset, owner, spender)).or_default();
        *allowance = allowance
            .checked_sub(amount)
            .ok_or_else(|| revert("allowance exceeded"))?;
        self.transfer(asset, owner, spender, amount)
    }

    /// Moves `amount` of `coin` from `from` into `venue`. Native coins must have arrived as value.
    fn collect(
        &mut self,
        coin: Address,
        from: Address,
        venue: Address,
        amount: U256,
        value: U256,
    ) -> Result<(), Bytes> {
        if is_native(coin) {
            return if value >= amount {
                Ok(())
            } else {
                Err(revert("insufficient value"))
            };
        }
        self.transfer_from(coin, from, venue, amount)
    }

    fn pay(&mut self, coin: Address, venue: Address, to: Address, amount: U256) -> Result<(), Bytes> {
        if is_native(coin) {
            self.transfer_native(venue, to, amount)
        } else {
            self.transfer(coin, venue, to, amount)
        }
    }
}

pub(crate) trait MockVenue {
    fn view(&self, ledger: &Ledger, data: &[u8]) -> Result<Bytes, Bytes>;

    fn call(
        &self,
        ledger: &mut Ledger,
        from: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, Bytes>;
}

/// A chain with ERC20 semantics for every address, a wrapped native token and pluggable venues.
///
/// A failing call leaves no trace, like a reverted call frame.
pub(crate) struct MockChain {
    pub ledger: Ledger,
    wrapped_native: Address,
    venues: HashMap<Address, Box<dyn MockVenue>>,
    snapshots: Vec<(SnapshotId, Ledger)>,
    next_snapshot: u64,
    sent: Vec<VenueCall>,
}

impl MockChain {
    pub fn new(wrapped_native: Address) -> Self {
        Self {
            ledger: Ledger::default(),
            wrapped_native,
            venues: HashMap::new(),
            snapshots: Vec::new(),
            next_snapshot: 0,
            sent: Vec::new(),
        }
    }

    pub fn add_venue(&mut self, address: Address, venue: impl MockVenue + 'static) {
        self.venues.insert(address, Box::new(venue));
    }

    /// Mints wrapped native to `holder`, backed by native held by the wrapper.
    pub fn mint_wrapped(&mut self, holder: Address, amount: U256) {
        self.ledger.mint(self.wrapped_native, holder, amount);
        self.ledger.fund_native(self.wrapped_native, amount);
    }

    /// Every call sent so far, including ones that reverted or were rolled back.
    pub fn sent(&self) -> &[VenueCall] {
        &self.sent
    }

    pub fn open_snapshots(&self) -> usize {
        self.snapshots.len()
    }

    fn dispatch(&mut self, from: Address, call: &VenueCall) -> Result<Bytes, Bytes> {
        if !call.value.is_zero() {
            self.ledger.transfer_native(from, call.target, call.value)?;
        }
        let data = &call.calldata[..];

        match selector(data) {
            s if s == IERC20::approveCall::SELECTOR => {
                let approve = decode::<IERC20::approveCall>(data)?;
                self.ledger
                    .approve(call.target, from, approve.spender, approve.amount);
                return Ok(true.abi_encode().into());
            }
            s if s == IERC20::transferCall::SELECTOR => {
                let transfer = decode::<IERC20::transferCall>(data)?;
                self.ledger
                    .transfer(call.target, from, transfer.to, transfer.amount)?;
                return Ok(true.abi_encode().into());
            }
            _ => {}
        }

        if call.target == self.wrapped_native {
            return match selector(data) {
                s if s == IWrappedNative::depositCall::SELECTOR => {
                    self.ledger.mint(self.wrapped_native, from, call.value);
                    Ok(Bytes::new())
                }
                s if s == IWrappedNative::withdrawCall::SELECTOR => {
                    let withdraw = decode::<IWrappedNative::withdrawCall>(data)?;
                    self.ledger.burn(self.wrapped_native, from, withdraw.amount)?;
                    self.ledger
                        .transfer_native(self.wrapped_native, from, withdraw.amount)?;
                    Ok(Bytes::new())
                }
                _ => Err(revert("unknown selector")),
            };
        }

        match self.venues.get(&call.target) {
            Some(venue) => venue.call(&mut self.ledger, from, call.value, data),
            None => Err(revert("no code")),
        }
    }
}

impl Chain for MockChain {
    fn native_balance(&self, holder: Address) -> U256 {
        self.ledger.native(holder)
    }

    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, Bytes> {
        if selector(calldata) == IERC20::balanceOfCall::SELECTOR {
            let query = decode::<IERC20::balanceOfCall>(calldata)?;
            return Ok(self.ledger.balance(target, query.account).abi_encode().into());
        }
        match self.venues.get(&target) {
            Some(venue) => venue.view(&self.ledger, calldata),
            None => Err(revert("no code")),
        }
    }

    fn call(&mut self, from: Address, call: &VenueCall) -> Result<Bytes, Bytes> {
        self.sent.push(call.clone());
        let frame = self.ledger.clone();
        let result = self.dispatch(from, call);
        if result.is_err() {
            self.ledger = frame;
        }
        result
    }

    fn snapshot(&mut self) -> SnapshotId {
        let id = SnapshotId(self.next_snapshot);
        self.next_snapshot += 1;
        self.snapshots.push((id, self.ledger.clone()));
        id
    }

    fn revert_to(&mut self, id: SnapshotId) {
        if let Some(position) = self.snapshots.iter().position(|(open, _)| *open == id) {
            self.ledger = self.snapshots[position].1.clone();
            self.snapshots.truncate(position);
        }
    }

    fn commit(&mut self, id: SnapshotId) {
        if let Some(position) = self.snapshots.iter().position(|(open, _)| *open == id) {
            self.snapshots.truncate(position);
        }
    }
}

/// Share asset resolution that always falls back to the venue.
pub(crate) struct NoShares;

impl ShareAssets for NoShares {
    fn share_asset(&self, venue: Address) -> Address {
        venue
    }
}

/// Curve-shaped pool that converts every amount at a fixed rate.
pub(crate) struct RatePool {
    address: Address,
    coins: Vec<Address>,
    lp: Address,
    numerator: U256,
    denominator: U256,
    failing: bool,
}

impl RatePool {
    pub fn stable(address: Address, coins: Vec<Address>) -> Self {
        Self {
            address,
            coins,
            lp: address,
            numerator: U256::from(1),
            denominator: U256::from(1),
            failing: false,
        }
    }

    pub fn with_rate(mut self, numerator: U256, denominator: U256) -> Self {
        self.numerator = numerator;
        self.denominator = denominator;
        self
    }

    pub fn with_lp(mut self, lp: Address) -> Self {
        self.lp = lp;
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Output the pool pays for `amount`.
    pub fn quote(&self, amount: U256) -> U256 {
        mul_div_floor(amount, self.numerator, self.denominator).unwrap_or_default()
    }

    fn coin(&self, index: usize) -> Result<Address, Bytes> {
        self.coins
            .get(index)
            .copied()
            .ok_or_else(|| revert("coin index out of range"))
    }

    fn swap(
        &self,
        ledger: &mut Ledger,
        from: Address,
        value: U256,
        i: usize,
        j: usize,
        dx: U256,
    ) -> Result<Bytes, Bytes> {
        ledger.collect(self.coin(i)?, from, self.address, dx, value)?;
        let dy = self.quote(dx);
        ledger.pay(self.coin(j)?, self.address, from, dy)?;
        Ok(dy.abi_encode().into())
    }

    fn deposit(
        &self,
        ledger: &mut Ledger,
        from: Address,
        value: U256,
        amounts: &[U256],
    ) -> Result<Bytes, Bytes> {
        let mut total = U256::ZERO;
        for (index, amount) in amounts.iter().enumerate() {
            if !amount.is_zero() {
                ledger.collect(self.coin(index)?, from, self.address, *amount, value)?;
                total += *amount;
            }
        }
        let minted = self.quote(total);
        ledger.mint(self.lp, from, minted);
        Ok(minted.abi_encode().into())
    }

    fn withdraw_one(
        &self,
        ledger: &mut Ledger,
        from: Address,
        burn: U256,
        index: usize,
    ) -> Result<Bytes, Bytes> {
        ledger.burn(self.lp, from, burn)?;
        let out = self.quote(burn);
        ledger.pay(self.coin(index)?, self.address, from, out)?;
        Ok(out.abi_encode().into())
    }
}

impl MockVenue for RatePool {
    fn view(&self, _ledger: &Ledger, data: &[u8]) -> Result<Bytes, Bytes> {
        if selector(data) == ICurvePool::coinsCall::SELECTOR {
            let query = decode::<ICurvePool::coinsCall>(data)?;
            return Ok(self.coin(query.i.to::<usize>())?.abi_encode().into());
        }
        Err(revert("unknown view"))
    }

    fn call(
        &self,
        ledger: &mut Ledger,
        from: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, Bytes> {
        if self.failing {
            return Err(revert("pool paused"));
        }
        match selector(data) {
            s if s == ICurvePool::exchangeCall::SELECTOR => {
                let c = decode::<ICurvePool::exchangeCall>(data)?;
                self.swap(ledger, from, value, c.i as usize, c.j as usize, c.dx)
            }
            s if s == ICurvePool::exchange_underlyingCall::SELECTOR => {
                let c = decode::<ICurvePool::exchange_underlyingCall>(data)?;
                self.swap(ledger, from, value, c.i as usize, c.j as usize, c.dx)
            }
            s if s == ICurveCryptoPool::exchangeCall::SELECTOR => {
                let c = decode::<ICurveCryptoPool::exchangeCall>(data)?;
                self.swap(ledger, from, value, c.i.to(), c.j.to(), c.dx)
            }
            s if s == ICurvePool2::add_liquidityCall::SELECTOR => {
                let c = decode::<ICurvePool2::add_liquidityCall>(data)?;
                self.deposit(ledger, from, value, &c.amounts)
            }
            s if s == ICurvePool3::add_liquidityCall::SELECTOR => {
                let c = decode::<ICurvePool3::add_liquidityCall>(data)?;
                self.deposit(ledger, from, value, &c.amounts)
            }
            s if s == ICurvePool4::add_liquidityCall::SELECTOR => {
                let c = decode::<ICurvePool4::add_liquidityCall>(data)?;
                self.deposit(ledger, from, value, &c.amounts)
            }
            s if s == ICurvePool::remove_liquidity_one_coinCall::SELECTOR => {
                let c = decode::<ICurvePool::remove_liquidity_one_coinCall>(data)?;
                self.withdraw_one(ledger, from, c.token_amount, c.i as usize)
            }
            s if s == ICurveCryptoPool::remove_liquidity_one_coinCall::SELECTOR => {
                let c = decode::<ICurveCryptoPool::remove_liquidity_one_coinCall>(data)?;
                self.withdraw_one(ledger, from, c.token_amount, c.i.to())
            }
            _ => Err(revert("unknown selector")),
        }
    }
}

/// Constant-product style router mock paying a fixed rate along a two-token path.
pub(crate) struct RateRouter {
    address: Address,
    numerator: U256,
    denominator: U256,
}

impl RateRouter {
    pub fn new(address: Address, numerator: U256, denominator: U256) -> Self {
        Self {
            address,
            numerator,
            denominator,
        }
    }
}

impl MockVenue for RateRouter {
    fn view(&self, _ledger: &Ledger, _data: &[u8]) -> Result<Bytes, Bytes> {
        Err(revert("unknown view"))
    }

    fn call(
        &self,
        ledger: &mut Ledger,
        from: Address,
        _value: U256,
        data: &[u8],
    ) -> Result<Bytes, Bytes> {
        if selector(data) != IUniswapV2Router::swapExactTokensForTokensCall::SELECTOR {
            return Err(revert("unknown selector"));
        }
        let c = decode::<IUniswapV2Router::swapExactTokensForTokensCall>(data)?;
        let (Some(token_in), Some(token_out)) = (c.path.first(), c.path.last()) else {
            return Err(revert("invalid path"));
        };
        ledger.transfer_from(*token_in, from, self.address, c.amountIn)?;
        let out = mul_div_floor(c.amountIn, self.numerator, self.denominator)
            .map_err(|_| revert("math"))?;
        ledger.transfer(*token_out, self.address, c.to, out)?;
        Ok(vec![c.amountIn, out].abi_encode().into())
    }
}

/// Read-only venue answering fixed calldata with fixed return data.
#[derive(Default)]
pub(crate) struct StubVenue {
    answers: HashMap<Vec<u8>, Vec<u8>>,
}

impl StubVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer<C: SolCall, V: SolValue>(self, call: &C, value: V) -> Self {
        self.answer_raw(call, value.abi_encode())
    }

    pub fn answer_raw<C: SolCall>(mut self, call: &C, data: Vec<u8>) -> Self {
        self.answers.insert(call.abi_encode(), data);
        self
    }
}

impl MockVenue for StubVenue {
    fn view(&self, _ledger: &Ledger, data: &[u8]) -> Result<Bytes, Bytes> {
        self.answers
            .get(data)
            .map(|answer| Bytes::from(answer.clone()))
            .ok_or_else(|| revert("unknown view"))
    }

    fn call(
        &self,
        _ledger: &mut Ledger,
        _from: Address,
        _value: U256,
        _data: &[u8],
    ) -> Result<Bytes, Bytes> {
        Err(revert("read-only stub"))
    }
}

/// Rebasing liquid-stake token; minting loses one unit to share rounding.
pub(crate) struct LiquidStakeToken {
    address: Address,
}

impl LiquidStakeToken {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl MockVenue for LiquidStakeToken {
    fn view(&self, _ledger: &Ledger, _data: &[u8]) -> Result<Bytes, Bytes> {
        Err(revert("unknown view"))
    }

    fn call(
        &self,
        ledger: &mut Ledger,
        from: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, Bytes> {
        if selector(data) != ILiquidStake::submitCall::SELECTOR {
            return Err(revert("unknown selector"));
        }
        if value.is_zero() {
            return Err(revert("ZERO_DEPOSIT"));
        }
        let minted = value - U256::from(1);
        ledger.mint(self.address, from, minted);
        Ok(minted.abi_encode().into())
    }
}

/// Non-rebasing wrapper over [`LiquidStakeToken`] at a fixed exchange rate.
pub(crate) struct WrappedLiquidStake {
    address: Address,
    staked: Address,
    numerator: U256,
    denominator: U256,
}

impl WrappedLiquidStake {
    pub fn new(address: Address, staked: Address, numerator: U256, denominator: U256) -> Self {
        Self {
            address,
            staked,
            numerator,
            denominator,
        }
    }
}

impl MockVenue for WrappedLiquidStake {
    fn view(&self, _ledger: &Ledger, data: &[u8]) -> Result<Bytes, Bytes> {
        if selector(data) == IWrappedLiquidStake::stETHCall::SELECTOR {
            return Ok(self.staked.abi_encode().into());
        }
        Err(revert("unknown view"))
    }

    fn call(
        &self,
        ledger: &mut Ledger,
        from: Address,
        _value: U256,
        data: &[u8],
    ) -> Result<Bytes, Bytes> {
        match selector(data) {
            s if s == IWrappedLiquidStake::wrapCall::SELECTOR => {
                let c = decode::<IWrappedLiquidStake::wrapCall>(data)?;
                ledger.transfer_from(self.staked, from, self.address, c.amount)?;
                let wrapped = mul_div_floor(c.amount, self.numerator, self.denominator)
                    .map_err(|_| revert("math"))?;
                ledger.mint(self.address, from, wrapped);
                Ok(wrapped.abi_encode().into())
            }
            s if s == IWrappedLiquidStake::unwrapCall::SELECTOR => {
                let c = decode::<IWrappedLiquidStake::unwrapCall>(data)?;
                ledger.burn(self.address, from, c.amount)?;
                let unwrapped = mul_div_floor(c.amount, self.denominator, self.numerator)
                    .map_err(|_| revert("math"))?;
                ledger.transfer(self.staked, self.address, from, unwrapped)?;
                Ok(unwrapped.abi_encode().into())
            }
            _ => Err(revert("unknown selector")),
        }
    }
}
