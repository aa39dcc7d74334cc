//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use sitemap_rss::core::create_feed;
    use sitemap_rss::network::session::Session;

    use crate::common::{html_page, item_titles, options_for, parse_channel, urlset};

    #[tokio::test]
    async fn urls_become_titles_without_scraping() {
        let mut server = mockito::Server::new_async().await;
        let pages: Vec<String> = ["a", "b", "c"]
            .iter()
            .map(|p| format!("{}/{p}", server.url()))
            .collect();

        server
            .mock("GET", "/sitemap.xml")
            .with_header("content-type", "application/xml")
            .with_body(urlset(&[
                (pages[0].clone(), Some("2023-05-01T00:00:00Z")),
                (pages[1].clone(), None),
                (pages[2].clone(), Some("2023-05-01")),
            ]))
            .create_async()
            .await;
        let page_requests = server
            .mock("GET", mockito::Matcher::Regex("^/[abc]$".to_string()))
            .expect(0)
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        let channel = parse_channel(&feed);
        assert_eq!(channel.title(), "Example");
        assert_eq!(item_titles(&channel), pages);

        let links: Vec<_> = channel.items().iter().filter_map(|i| i.link()).collect();
        assert_eq!(links, pages);

        page_requests.assert_async().await;
    }

    #[tokio::test]
    async fn publication_dates() {
        let mut server = mockito::Server::new_async().await;
        let page = format!("{}/dated", server.url());

        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[
                (page.clone(), Some("2023-05-01T10:00:00+02:00")),
                (page.clone(), None),
                (page.clone(), Some("last tuesday")),
            ]))
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        let dates: Vec<_> = parse_channel(&feed)
            .items()
            .iter()
            .map(|i| i.pub_date().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            dates,
            [
                "Mon, 01 May 2023 08:00:00 GMT",
                "Sat, 01 Jan 2000 00:00:00 GMT",
                "Sat, 01 Jan 2000 00:00:00 GMT",
            ]
        );
    }

    #[tokio::test]
    async fn scraped_titles_replace_urls() {
        let mut server = mockito::Server::new_async().await;
        let hello = format!("{}/hello", server.url());
        let missing = format!("{}/missing", server.url());
        let untitled = format!("{}/untitled", server.url());

        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[
                (hello.clone(), None),
                (missing.clone(), None),
                (untitled.clone(), None),
            ]))
            .create_async()
            .await;
        server
            .mock("GET", "/hello")
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(html_page("  Hello\n  World "))
            .create_async()
            .await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(html_page("Not Found"))
            .create_async()
            .await;
        server
            .mock("GET", "/untitled")
            .with_body("<html><body>No title here</body></html>")
            .create_async()
            .await;

        let mut options = options_for(&server);
        options.scrape_titles = true;
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        assert_eq!(
            item_titles(&parse_channel(&feed)),
            ["Hello World".to_string(), missing, untitled]
        );
    }

    #[tokio::test]
    async fn legacy_charset_titles() {
        let mut server = mockito::Server::new_async().await;
        let page = format!("{}/cafe", server.url());

        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[(page.clone(), None)]))
            .create_async()
            .await;

        let mut body = b"<html><head><title>Caf".to_vec();
        body.push(0xE9);
        body.extend_from_slice(b"</title></head></html>");
        server
            .mock("GET", "/cafe")
            .with_header("content-type", "text/html; charset=windows-1252")
            .with_body(body)
            .create_async()
            .await;

        let mut options = options_for(&server);
        options.scrape_titles = true;
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        assert_eq!(item_titles(&parse_channel(&feed)), ["Café"]);
    }

    #[tokio::test]
    async fn sitemap_index_children_in_order() {
        let mut server = mockito::Server::new_async().await;
        let posts = format!("{}/posts.xml", server.url());
        let pages = format!("{}/pages.xml", server.url());
        let first = format!("{}/posts/first", server.url());
        let second = format!("{}/posts/second", server.url());
        let about = format!("{}/about", server.url());

        server
            .mock("GET", "/sitemap.xml")
            .with_body(crate::common::sitemap_index(&[posts, pages]))
            .create_async()
            .await;
        server
            .mock("GET", "/posts.xml")
            .with_body(urlset(&[(first.clone(), None), (second.clone(), None)]))
            .create_async()
            .await;
        server
            .mock("GET", "/pages.xml")
            .with_body(urlset(&[(about.clone(), None)]))
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        assert_eq!(item_titles(&parse_channel(&feed)), [first, second, about]);
    }

    #[tokio::test]
    async fn empty_sitemap_yields_empty_channel() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/sitemap.xml")
            .with_body("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"></urlset>")
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        let channel = parse_channel(&feed);
        assert!(channel.items().is_empty());
        assert_eq!(channel.link(), format!("{}/", server.url()));
    }

    #[tokio::test]
    async fn relative_locations_are_kept() {
        let mut server = mockito::Server::new_async().await;
        let good = format!("{}/good", server.url());
        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[(good.clone(), None), ("/relative".to_string(), None)]))
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        assert_eq!(
            item_titles(&parse_channel(&feed)),
            [good, "/relative".to_string()]
        );
    }

    #[tokio::test]
    async fn site_need_not_be_a_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[(format!("{}/page", server.url()), None)]))
            .create_async()
            .await;

        let mut options = options_for(&server);
        options.site = "my blog".to_string();
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        let channel = parse_channel(&feed);
        assert_eq!(channel.link(), "my blog");
        assert_eq!(channel.items().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_lastmod_uses_default_date() {
        let mut server = mockito::Server::new_async().await;
        let page = format!("{}/page", server.url());
        server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset(&[
                (page.clone(), Some("9999-12-31T23:59:59-05:00")),
                (page.clone(), Some("2023-05-01")),
            ]))
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let feed = create_feed(&session, &options, None).await.unwrap();

        let dates: Vec<_> = parse_channel(&feed)
            .items()
            .iter()
            .map(|i| i.pub_date().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            dates,
            ["Sat, 01 Jan 2000 00:00:00 GMT", "Mon, 01 May 2023 00:00:00 GMT"]
        );
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use sitemap_rss::core::{create_feed, FeedError, FeedOptions};
    use sitemap_rss::network::session::Session;

    use crate::common::{options_for, sitemap_index, urlset};

    #[tokio::test]
    async fn sitemap_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/sitemap.xml")
            .with_status(404)
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(result, Err(FeedError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn sitemap_is_not_xml() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/sitemap.xml")
            .with_body("<html><body>Oops</body></html>")
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(result, Err(FeedError::Sitemap { .. })));
    }

    #[tokio::test]
    async fn invalid_sitemap_url() {
        let options = FeedOptions {
            sitemap_url: "not a url".to_string(),
            ..FeedOptions::default()
        };
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(result, Err(FeedError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn unreachable_host() {
        let options = FeedOptions {
            sitemap_url: "http://127.0.0.1:1/sitemap.xml".to_string(),
            ..FeedOptions::default()
        };
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(result, Err(FeedError::Network { .. })));
    }

    #[tokio::test]
    async fn failing_child_sitemap_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        let good = format!("{}/good.xml", server.url());
        let bad = format!("{}/bad.xml", server.url());

        server
            .mock("GET", "/sitemap.xml")
            .with_body(sitemap_index(&[good, bad]))
            .create_async()
            .await;
        server
            .mock("GET", "/good.xml")
            .with_body(urlset(&[(format!("{}/page", server.url()), None)]))
            .create_async()
            .await;
        server
            .mock("GET", "/bad.xml")
            .with_status(500)
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(result, Err(FeedError::HttpStatus { status: 500, .. })));
    }

    #[tokio::test]
    async fn self_referencing_index() {
        let mut server = mockito::Server::new_async().await;
        let itself = format!("{}/sitemap.xml", server.url());
        server
            .mock("GET", "/sitemap.xml")
            .with_body(sitemap_index(&[itself]))
            .create_async()
            .await;

        let options = options_for(&server);
        let session = Session::new(&options).unwrap();
        let result = create_feed(&session, &options, None).await;

        assert!(matches!(
            result,
            Err(FeedError::SitemapTooDeep { max_depth: 3, .. })
        ));
    }
}
