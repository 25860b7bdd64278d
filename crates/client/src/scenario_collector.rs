//! # 組織シナリオの全件取得
//!
//! シナリオ一覧 API をページごとに順番に呼び出し、結果を 1 つの列に連結する。
//!
//! ## 終端判定
//!
//! API は「次のページがあるか」を返さないため、サーバーが返した `pg.limit` より
//! 件数が少ないページを最終ページとみなす（[`ScenarioPage::is_last`]）。
//!
//! - 件数がページサイズの倍数の場合、最後に空ページを 1 回余分に取得する
//! - 途中で件数の少ないページが返ると、そこで打ち切る
//!
//! 取得中に対象コレクションへの書き込みがあった場合、この判定で取りこぼしが
//! 起きないことは API 側で保証されていない。
//!
//! ## 失敗時
//!
//! どのページで失敗しても、取得済みの分は返さずにエラーをそのまま返す。
//! リトライは行わない。

use crate::{
    client::{MakeApiError, MakeScenarioClient, Scenario},
    pagination::Pagination,
};

/// 1 ページあたりの取得件数
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// 1 回の全件取得で要求するページ数の上限
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// 全件取得のオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// 1 ページあたりの取得件数（1 以上）
    pub page_size: u32,
    /// 要求するページ数の上限
    ///
    /// 終端しないサーバーに対する無限ループを防ぐ。
    pub max_pages: u32,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// 組織のシナリオをすべて取得する
///
/// `id` 昇順で先頭ページから順に取得し、受信順のまま連結して返す。
/// 並べ替えや重複排除は行わない。
///
/// # エラー
///
/// - いずれかのページ取得が失敗した場合はそのエラー
/// - `page_size` が 0 の場合は `InvalidArgument`
/// - `max_pages` ページ取得しても終端しない場合は `PageLimitExceeded`
/// - 次のページのオフセットが `u32` に収まらない場合は `OffsetOverflow`
#[tracing::instrument(skip(client), level = "debug")]
pub async fn collect_org_scenarios<C>(
    client: &C,
    organization_id: u64,
    options: &CollectOptions,
) -> Result<Vec<Scenario>, MakeApiError>
where
    C: MakeScenarioClient + ?Sized,
{
    if options.page_size == 0 {
        return Err(MakeApiError::InvalidArgument(
            "page_size は 1 以上である必要があります".to_string(),
        ));
    }

    let mut pagination = Pagination::first_page(options.page_size);
    let mut results = Vec::new();
    let mut pages: u32 = 0;

    loop {
        if pages >= options.max_pages {
            tracing::warn!(
                organization_id,
                max_pages = options.max_pages,
                fetched = results.len(),
                "ページ数の上限に達したため取得を中断しました"
            );
            return Err(MakeApiError::PageLimitExceeded {
                max_pages: options.max_pages,
            });
        }

        let page = client.list_scenarios(organization_id, &pagination).await?;
        pages += 1;

        tracing::debug!(
            offset = pagination.offset,
            returned = page.scenarios.len(),
            server_limit = page.pg.limit,
            "シナリオ一覧のページを取得しました"
        );

        let is_last = page.is_last();
        results.extend(page.scenarios);

        if is_last {
            break;
        }

        pagination = match pagination.next_page() {
            Some(next) => next,
            None => {
                tracing::warn!(
                    organization_id,
                    offset = pagination.offset,
                    limit = pagination.limit,
                    fetched = results.len(),
                    "オフセットが上限を超えるため取得を中断しました"
                );
                return Err(MakeApiError::OffsetOverflow {
                    offset: pagination.offset,
                    limit:  pagination.limit,
                });
            }
        };
    }

    tracing::debug!(total = results.len(), pages, "シナリオの全件取得が完了しました");

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        client::ScenarioResponse,
        pagination::{PageInfo, ScenarioPage, SortDir},
    };

    // ===== スタブ =====

    /// ページ取得の応答
    enum PageReply {
        /// 指定件数のシナリオを返す
        Page { ids: Vec<u64>, server_limit: u32 },
        /// エラーを返す
        Fail(MakeApiError),
    }

    /// シナリオ一覧 API のスタブ
    ///
    /// 受け取ったページ指定を記録し、あらかじめ用意した応答を順に返す。
    struct StubScenarioClient {
        replies:  Mutex<Vec<PageReply>>,
        requests: Mutex<Vec<(u64, Pagination)>>,
    }

    impl StubScenarioClient {
        fn new(mut replies: Vec<PageReply>) -> Self {
            replies.reverse();
            Self {
                replies:  Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// `total` 件を `server_limit` 件ずつ返す、正しく振る舞うサーバー
        fn with_records(total: u64, server_limit: u32) -> Self {
            let chunk = server_limit as u64;
            let mut replies = Vec::new();
            let mut start = 0;
            loop {
                let end = (start + chunk).min(total);
                let ids: Vec<u64> = (start..end).map(|i| i + 1).collect();
                let full = ids.len() as u64 == chunk;
                replies.push(PageReply::Page { ids, server_limit });
                if !full {
                    break;
                }
                start = end;
            }
            Self::new(replies)
        }

        fn requests(&self) -> Vec<(u64, Pagination)> {
            self.requests.lock().unwrap().clone()
        }

        fn offsets(&self) -> Vec<u32> {
            self.requests().into_iter().map(|(_, pg)| pg.offset).collect()
        }
    }

    fn scenario(id: u64) -> Scenario {
        Scenario {
            id,
            name: Some(format!("scenario-{id}")),
            ..Default::default()
        }
    }

    fn ids(scenarios: &[Scenario]) -> Vec<u64> {
        scenarios.iter().map(|s| s.id).collect()
    }

    #[async_trait]
    impl MakeScenarioClient for StubScenarioClient {
        async fn get_scenario(&self, _scenario_id: u64) -> Result<ScenarioResponse, MakeApiError> {
            Err(MakeApiError::ScenarioNotFound)
        }

        async fn list_scenarios(
            &self,
            organization_id: u64,
            pagination: &Pagination,
        ) -> Result<ScenarioPage, MakeApiError> {
            self.requests
                .lock()
                .unwrap()
                .push((organization_id, pagination.clone()));

            match self.replies.lock().unwrap().pop() {
                Some(PageReply::Page { ids, server_limit }) => Ok(ScenarioPage {
                    scenarios: ids.into_iter().map(scenario).collect(),
                    pg:        PageInfo::with_limit(server_limit),
                }),
                Some(PageReply::Fail(err)) => Err(err),
                None => panic!("想定外のページ要求: offset={}", pagination.offset),
            }
        }
    }

    fn options(page_size: u32) -> CollectOptions {
        CollectOptions {
            page_size,
            ..Default::default()
        }
    }

    // ===== 基本シナリオ =====

    #[tokio::test]
    async fn test_ちょうど1ページ分のとき空ページを確認して2回で終わる() {
        let client = StubScenarioClient::with_records(50, 50);

        let result = collect_org_scenarios(&client, 7, &options(50)).await.unwrap();

        assert_eq!(result.len(), 50);
        assert_eq!(client.offsets(), vec![0, 50]);
    }

    #[tokio::test]
    async fn test_端数ページのみのとき1回で終わる() {
        let client = StubScenarioClient::with_records(30, 50);

        let result = collect_org_scenarios(&client, 7, &options(50)).await.unwrap();

        assert_eq!(result.len(), 30);
        assert_eq!(client.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_シナリオがないとき1回で空を返す() {
        let client = StubScenarioClient::with_records(0, 50);

        let result = collect_org_scenarios(&client, 7, &options(50)).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_2ページ目が500のとき結果を返さずエラーになる() {
        let client = StubScenarioClient::new(vec![
            PageReply::Page {
                ids:          (1..=50).collect(),
                server_limit: 50,
            },
            PageReply::Fail(MakeApiError::Unexpected {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body:   "boom".to_string(),
            }),
        ]);

        let result = collect_org_scenarios(&client, 7, &options(50)).await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(client.requests().len(), 2);
    }

    // ===== 性質 =====

    #[rstest]
    #[case(0, 50, 1)]
    #[case(1, 50, 1)]
    #[case(49, 50, 1)]
    #[case(50, 50, 2)]
    #[case(51, 50, 2)]
    #[case(100, 50, 3)]
    #[case(149, 50, 3)]
    #[case(7, 3, 3)]
    #[case(9, 3, 4)]
    #[case(5, 1, 6)]
    #[tokio::test]
    async fn test_全件を取得しリクエスト回数が件数とページサイズから決まる(
        #[case] total: u64,
        #[case] page_size: u32,
        #[case] expected_requests: usize,
    ) {
        let client = StubScenarioClient::with_records(total, page_size);

        let result = collect_org_scenarios(&client, 1, &options(page_size))
            .await
            .unwrap();

        assert_eq!(ids(&result), (1..=total).collect::<Vec<_>>());
        assert_eq!(client.requests().len(), expected_requests);
    }

    #[tokio::test]
    async fn test_オフセットはページサイズずつ単調に増える() {
        let client = StubScenarioClient::with_records(130, 25);

        collect_org_scenarios(&client, 1, &options(25)).await.unwrap();

        assert_eq!(client.offsets(), vec![0, 25, 50, 75, 100, 125]);
    }

    #[tokio::test]
    async fn test_すべてのリクエストが同じ組織_limit_ソート条件を使う() {
        let client = StubScenarioClient::with_records(120, 50);

        collect_org_scenarios(&client, 42, &options(50)).await.unwrap();

        for (organization_id, pg) in client.requests() {
            assert_eq!(organization_id, 42);
            assert_eq!(pg.limit, 50);
            assert_eq!(pg.sort_by, "id");
            assert_eq!(pg.sort_dir, SortDir::Asc);
        }
    }

    #[tokio::test]
    async fn test_サーバーの返した順序を並べ替えずに連結する() {
        let client = StubScenarioClient::new(vec![
            PageReply::Page {
                ids:          vec![9, 3, 3],
                server_limit: 3,
            },
            PageReply::Page {
                ids:          vec![1, 8],
                server_limit: 3,
            },
        ]);

        let result = collect_org_scenarios(&client, 1, &options(3)).await.unwrap();

        assert_eq!(ids(&result), vec![9, 3, 3, 1, 8]);
    }

    #[tokio::test]
    async fn test_途中で件数の少ないページが返るとそこで打ち切る() {
        let client = StubScenarioClient::new(vec![
            PageReply::Page {
                ids:          vec![1, 2],
                server_limit: 3,
            },
            PageReply::Page {
                ids:          vec![3, 4, 5],
                server_limit: 3,
            },
        ]);

        let result = collect_org_scenarios(&client, 1, &options(3)).await.unwrap();

        assert_eq!(ids(&result), vec![1, 2]);
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_サーバーのlimitが要求より小さくても要求したページサイズで進む() {
        // サーバーは limit=2 に丸めるが、オフセットは要求した 3 ずつ進む
        let client = StubScenarioClient::new(vec![
            PageReply::Page {
                ids:          vec![1, 2],
                server_limit: 2,
            },
            PageReply::Page {
                ids:          vec![],
                server_limit: 2,
            },
        ]);

        collect_org_scenarios(&client, 1, &options(3)).await.unwrap();

        assert_eq!(client.offsets(), vec![0, 3]);
    }

    #[tokio::test]
    async fn test_1ページ目が失敗したときエラーをそのまま返す() {
        let client = StubScenarioClient::new(vec![PageReply::Fail(MakeApiError::Network(
            "connection refused".to_string(),
        ))]);

        let result = collect_org_scenarios(&client, 1, &options(50)).await;

        assert!(matches!(result, Err(MakeApiError::Network(msg)) if msg == "connection refused"));
    }

    // ===== ガード =====

    #[tokio::test]
    async fn test_終端しないサーバーはページ上限でエラーになる() {
        let replies = (0..3)
            .map(|_| PageReply::Page {
                ids:          vec![1, 2],
                server_limit: 2,
            })
            .collect();
        let client = StubScenarioClient::new(replies);

        let result = collect_org_scenarios(
            &client,
            1,
            &CollectOptions {
                page_size: 2,
                max_pages: 3,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(MakeApiError::PageLimitExceeded { max_pages: 3 })
        ));
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_オフセットがu32を超えるときは同じページを再要求せずエラーになる() {
        let replies = (0..2)
            .map(|_| PageReply::Page {
                ids:          vec![1],
                server_limit: 1,
            })
            .collect();
        let client = StubScenarioClient::new(replies);

        let result = collect_org_scenarios(&client, 1, &options(1 << 31)).await;

        assert!(matches!(
            result,
            Err(MakeApiError::OffsetOverflow {
                offset: 2_147_483_648,
                limit:  2_147_483_648,
            })
        ));
        assert_eq!(client.offsets(), vec![0, 1 << 31]);
    }

    #[tokio::test]
    async fn test_ページサイズ0はリクエストせずにエラーになる() {
        let client = StubScenarioClient::new(vec![]);

        let result = collect_org_scenarios(&client, 1, &options(0)).await;

        assert!(matches!(result, Err(MakeApiError::InvalidArgument(_))));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_org_scenariosは50件ずつ取得する() {
        let client = StubScenarioClient::with_records(120, 50);

        let result = client.get_org_scenarios(1).await.unwrap();

        assert_eq!(result.len(), 120);
        assert_eq!(client.offsets(), vec![0, 50, 100]);
    }
}
