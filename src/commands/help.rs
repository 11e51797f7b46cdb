pub fn execute() -> String {
    "📖 Crypto-Era Commands\n\
     \n\
     Market\n\
     \x20 markets | m            Show the market table\n\
     \x20 search <term> | s      Filter the table by coin name (no term clears)\n\
     \x20 refresh                Reload market data\n\
     \n\
     Coins\n\
     \x20 view [coin] | v        Show details for a coin (id, name or symbol)\n\
     \x20 back | b               Close the detail view\n\
     \x20 watch <coin> | w       Add a coin to the watchlist\n\
     \x20 watchlist | wl         Show the watchlist\n\
     \x20 recent | r             Show recently viewed coins\n\
     \n\
     Charts\n\
     \x20 chart [coin...] | c    Sampled price chart, saved as PNG.\n\
     \x20                        Defaults to the selected coin, else BTC/ETH/LTC.\n\
     \n\
     \x20 help | h               Show this help\n\
     \x20 quit | q               Leave\n"
        .to_string()
}
