//! 所有请求共享的参数：客户端、URL、请求体、超时。

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, RequestBuilder};

use crate::internal::downloader::structs::DownloadRequest;

/// 探测与拉取共用的请求上下文；Clone 代价很小，每个分片任务各持一份。
#[derive(Debug, Clone)]
pub(crate) struct FetchContext {
    pub(crate) client: Client,
    pub(crate) url: Arc<str>,
    pub(crate) body: Option<Bytes>,
    pub(crate) timeout: Option<Duration>,
}

impl FetchContext {
    pub(crate) fn new(client: Client, request: &DownloadRequest) -> Self {
        Self {
            client,
            url: Arc::from(request.url()),
            body: request.body().cloned(),
            timeout: request.timeout(),
        }
    }

    fn with_timeout(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    }

    /// 拉取请求：有请求体时为 POST，否则为 GET。
    pub(crate) fn fetch(&self) -> RequestBuilder {
        let builder = match &self.body {
            Some(body) => self.client.post(&*self.url).body(body.clone()),
            None => self.client.get(&*self.url),
        };
        self.with_timeout(builder)
    }

    pub(crate) fn head(&self) -> RequestBuilder {
        self.with_timeout(self.client.head(&*self.url))
    }
}
