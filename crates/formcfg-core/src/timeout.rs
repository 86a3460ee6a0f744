//! Deadline applied to every service operation
//!
//! The deadline comes from `AppBuilder::store_timeout`, or per call from a
//! service copy made with `with_timeout`. Dropping an operation's future
//! cancels it the same way an expired deadline does.

use std::time::Duration;

use crate::prelude::*;

/// Run a store-backed operation under a deadline
///
/// On expiry the operation future is dropped together with any transaction it
/// holds open, which rolls the transaction back.
pub(crate) async fn timed<T>(
	limit: Duration,
	op: &'static str,
	fut: impl Future<Output = FcResult<T>>,
) -> FcResult<T> {
	match tokio::time::timeout(limit, fut).await {
		Ok(res) => res,
		Err(_) => {
			warn!(op, limit = ?limit, "Store operation timed out");
			Err(Error::Timeout)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_timed_passes_result_through() {
		let res = timed(Duration::from_secs(1), "test", async { Ok(7) }).await;
		assert_eq!(res.ok(), Some(7));

		let res: FcResult<()> =
			timed(Duration::from_secs(1), "test", async { Err(Error::NotFound) }).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_timed_expires() {
		let res: FcResult<()> = timed(Duration::from_millis(10), "test", async {
			tokio::time::sleep(Duration::from_secs(5)).await;
			Ok(())
		})
		.await;
		assert!(matches!(res, Err(Error::Timeout)));
	}
}

// vim: ts=4
