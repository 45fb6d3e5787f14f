#![cfg(feature = "sqlite")]

mod common;

use common::{sqlite_fixture, titles};
use lightbnb_store::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn sqlite_property_search() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fixture = sqlite_fixture(true).await?;
        let store = LightBnbStore::new(fixture.cap.clone());

        // unreviewed listings never appear; everything else cheapest first
        let all = store
            .search_properties(&PropertySearch::new(), DEFAULT_SEARCH_LIMIT)
            .await?;
        assert_eq!(
            titles(&all),
            [
                "Quiet condo",
                "Garden suite",
                "Back Bay studio",
                "Harbour loft",
                "Brownstone flat"
            ]
        );
        assert_eq!(all[0].average_rating, Some(5.0));
        assert_eq!(all[3].average_rating, Some(4.5));
        assert_eq!(all[1].description, None);
        assert!(all.iter().all(|p| p.active));

        let vancouver = store
            .search_properties(&PropertySearch::new().city("Vancouver"), 10)
            .await?;
        assert_eq!(titles(&vancouver), ["Garden suite", "Harbour loft"]);

        // substring match is case-sensitive
        let lower = store
            .search_properties(&PropertySearch::new().city("vancouver"), 10)
            .await?;
        assert!(lower.is_empty());

        let owned = store
            .search_properties(&PropertySearch::new().owner_id(2), 10)
            .await?;
        assert_eq!(titles(&owned), ["Garden suite", "Brownstone flat"]);

        let band = store
            .search_properties(
                &PropertySearch::new()
                    .minimum_price_per_night(80.0)
                    .maximum_price_per_night(100.0),
                10,
            )
            .await?;
        assert_eq!(titles(&band), ["Garden suite", "Back Bay studio"]);

        let rated = store
            .search_properties(&PropertySearch::new().minimum_rating(4.0), 10)
            .await?;
        assert_eq!(titles(&rated), ["Quiet condo", "Harbour loft", "Brownstone flat"]);

        let boston_rated = store
            .search_properties(&PropertySearch::new().city("Boston").minimum_rating(4.0), 10)
            .await?;
        assert_eq!(titles(&boston_rated), ["Brownstone flat"]);
        assert_eq!(boston_rated[0].cost_per_night, 20_000);

        let capped = store
            .search_properties(&PropertySearch::new().city("Boston"), 1)
            .await?;
        assert_eq!(titles(&capped), ["Back Bay studio"]);

        let nothing = store
            .search_properties(&PropertySearch::new().minimum_price_per_night(1_000.0), 10)
            .await?;
        assert!(nothing.is_empty());

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn sqlite_search_rows_carry_average_rating() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fixture = sqlite_fixture(true).await?;
        let store = LightBnbStore::new(fixture.cap.clone());

        let rs = store
            .search_properties_rows(&PropertySearch::new().owner_id(3), 10)
            .await?;
        assert_eq!(rs.len(), 2);
        let columns = rs.get_column_names().expect("column names");
        assert_eq!(columns.last().map(String::as_str), Some("average_rating"));
        assert_eq!(rs.results[0].get("title").and_then(RowValues::as_text), Some("Quiet condo"));
        assert_eq!(rs.results[1].get("average_rating").and_then(RowValues::as_float), Some(3.0));

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}

#[test]
fn sqlite_search_against_missing_schema_fails() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let fixture = sqlite_fixture(false).await?;
        let store = LightBnbStore::new(fixture.cap.clone());

        let result = store
            .search_properties(&PropertySearch::new().city("Boston"), 10)
            .await;
        let err = result.expect_err("query against an empty database must fail");
        assert!(matches!(err, StoreError::SqliteError(_)), "{err:?}");
        assert!(err.to_string().contains("no such table"));

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}
