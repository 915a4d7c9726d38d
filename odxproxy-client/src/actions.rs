// Odoo ORM actions
// Thin builders over `Client::execute`: each one fills in the action name,
// the positional params layout Odoo expects and the keyword modifiers the
// action accepts.

use crate::client::Client;
use crate::pending::PendingCall;
use odxproxy_core::{encode_params, Action, KeywordRequest, Param, RequestId};
use serde::de::DeserializeOwned;
use serde_json::Value;

impl Client {
    /// `search`: ids of the records matching the domain in `params`.
    pub fn search(
        &self,
        model: &str,
        params: &[Param],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<Vec<i64>> {
        let request = self.request(Action::Search, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(encode_params(params))
        });
        self.submit(request)
    }

    /// `search_read`: matching records, honoring fields/order/limit/offset.
    pub fn search_read<T>(
        &self,
        model: &str,
        params: &[Param],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .request(Action::SearchRead, model, id)
            .map(|r| r.with_keyword(keyword).with_params(encode_params(params)));
        self.submit(request)
    }

    /// `read`: the records with the given ids.
    pub fn read<T>(
        &self,
        model: &str,
        ids: &[i64],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.request(Action::Read, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(encode_params(&[Param::from(ids)]))
        });
        self.submit(request)
    }

    /// `search_count`: number of records matching the domain in `params`.
    pub fn search_count(
        &self,
        model: &str,
        params: &[Param],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<i64> {
        let request = self
            .request(Action::SearchCount, model, id)
            .map(|r| r.with_keyword(keyword).with_params(encode_params(params)));
        self.submit(request)
    }

    /// `create`: new record(s) from the value maps in `params`. The result is
    /// the new id, or a list of ids when several records are created.
    pub fn create<T>(
        &self,
        model: &str,
        params: &[Param],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.request(Action::Create, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(encode_params(params))
        });
        self.submit(request)
    }

    /// `write`: apply `values` to the records with the given ids.
    pub fn write(
        &self,
        model: &str,
        ids: &[i64],
        values: impl Into<Param>,
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<bool> {
        let params = [Param::from(ids), values.into()];
        let request = self.request(Action::Write, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(encode_params(&params))
        });
        self.submit(request)
    }

    /// `unlink`: delete the records with the given ids.
    pub fn unlink(
        &self,
        model: &str,
        ids: &[i64],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<bool> {
        let request = self.request(Action::Unlink, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(encode_params(&[Param::from(ids)]))
        });
        self.submit(request)
    }

    /// `fields_get`: field definitions of `model`.
    pub fn fields_get<T>(
        &self,
        model: &str,
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.request(Action::FieldsGet, model, id).map(|r| {
            r.with_keyword(keyword.reset_pagination())
                .with_params(Value::Array(Vec::new()))
        });
        self.submit(request)
    }

    /// `call_method`: invoke an arbitrary public model method.
    pub fn call_method<T>(
        &self,
        model: &str,
        fn_name: &str,
        params: &[Param],
        keyword: KeywordRequest,
        id: Option<RequestId>,
    ) -> PendingCall<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.request(Action::CallMethod, model, id).map(|r| {
            r.with_fn_name(fn_name)
                .with_keyword(keyword)
                .with_params(encode_params(params))
        });
        self.submit(request)
    }
}
