//! Vendor research endpoints

use crate::error::Result;
use crate::{BackendClient, ClientError, SubmitMode, SubmitOutcome, require_non_blank};
use aqeed_core::dto::vendor::{
    VendorComparisonRequest, VendorRecommendationRequest, VendorResearchRequest,
};
use serde::Serialize;

impl BackendClient {
    /// Recommend vendors matching a project's requirements
    pub async fn vendor_recommendations(
        &self,
        req: VendorRecommendationRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        require_non_blank("project_requirements", &req.project_requirements)?;
        self.submit_vendor_request("vendor-recommendations", &req, mode)
            .await
    }

    /// Research a single vendor's reputation and offering
    pub async fn vendor_research(
        &self,
        req: VendorResearchRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        require_non_blank("vendor_name", &req.vendor_name)?;
        self.submit_vendor_request("vendor-research", &req, mode).await
    }

    /// Compare two or more vendors
    pub async fn vendor_comparison(
        &self,
        req: VendorComparisonRequest,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        if req.vendors.len() < 2 {
            return Err(ClientError::InvalidRequest(
                "at least two vendors are needed for a comparison".to_string(),
            ));
        }
        self.submit_vendor_request("vendor-comparison", &req, mode)
            .await
    }

    async fn submit_vendor_request<T: Serialize>(
        &self,
        endpoint: &str,
        req: &T,
        mode: SubmitMode,
    ) -> Result<SubmitOutcome> {
        let url = self.endpoint(&[endpoint])?;
        let response = self
            .client
            .post(url)
            .query(&mode.as_query())
            .json(req)
            .send()
            .await?;

        self.handle_submit_response(response).await
    }
}
