use api_client::{CsvMarketData, Error, MarketDataProvider};
use core_types::Symbol;
use std::fs;

#[tokio::test]
async fn reads_symbol_file_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AAPL.csv"),
        "Date,Open,High,Low,Close,Volume\n\
         2024-01-02,187.15,188.44,183.89,185.64,82488700\n\
         2024-01-03,184.22,185.88,183.43,184.25,58414500\n",
    )
    .unwrap();

    let provider = CsvMarketData::new(dir.path());
    let table = provider.fetch(&Symbol::new("aapl"), "1d", "60d").await.unwrap();

    assert_eq!(provider.name(), "CsvFiles");
    assert_eq!(table.len(), 2);
    assert_eq!(table.column("Low"), Some(&[183.89, 183.43][..]));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvMarketData::new(dir.path());

    let err = provider.fetch(&Symbol::new("MSFT"), "1d", "60d").await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn header_only_file_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("SPY.csv"), "Date,High,Low,Close\n").unwrap();

    let err = CsvMarketData::new(dir.path())
        .fetch(&Symbol::new("SPY"), "1d", "60d")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoDataRetrieved { .. }));
}

#[tokio::test]
async fn newest_first_file_is_rejected_when_converted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("QQQ.csv"),
        "Date,High,Low,Close\n\
         2024-01-04,3,2,2.5\n\
         2024-01-03,2,1,1.5\n",
    )
    .unwrap();

    let table = CsvMarketData::new(dir.path())
        .fetch(&Symbol::new("QQQ"), "1d", "60d")
        .await
        .unwrap();
    assert!(matches!(
        table.to_series(),
        Err(core_types::Error::InvalidParameter(_))
    ));
}
